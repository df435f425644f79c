use once_cell::sync::Lazy;
use regex::Regex;

/// An `http(s)` link up to the first character that cannot be part of it.
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)https?://[^\s"'()<>\[\]]+"#).unwrap());

/// The link's path ends in an image extension, optionally followed by a query.
static IMAGE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(?:png|jpe?g|webp|gif|avif)(?:\?[^?#]*)?$").unwrap());

/// Sentence punctuation that may follow a link without belonging to it.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Direct image URLs in `text`, in order of appearance, duplicates kept.
///
/// ```
/// # use wanderwise_core::itinerary::find_images;
/// assert_eq!(
///     find_images("see https://x.com/a.jpg and https://y.com/b.png?x=1"),
///     ["https://x.com/a.jpg", "https://y.com/b.png?x=1"]
/// );
/// ```
pub fn find_images(text: &str) -> Vec<String> {
    URL.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|url| IMAGE_SUFFIX.is_match(url))
        .map(str::to_string)
        .collect()
}
