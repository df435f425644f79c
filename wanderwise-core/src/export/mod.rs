//! Export formats for generated itineraries.

mod html;

pub use html::{ExportRequest, render_itinerary_html};

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Minimal HTML for plain itinerary text: escaped paragraphs, `- ` blocks
/// as lists, single newlines as `<br/>`.
///
/// ```
/// # use wanderwise_core::export::plain_text_to_html;
/// assert_eq!(
///     plain_text_to_html("Hi & bye\nsee you\n\n- tea\n- rice"),
///     "<p>Hi &amp; bye<br/>see you</p><ul><li>tea</li><li>rice</li></ul>"
/// );
/// ```
pub fn plain_text_to_html(text: &str) -> String {
    let escaped = escape_html(text);
    escaped
        .split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| {
            if paragraph.trim_start().starts_with("- ") {
                let items: String = paragraph
                    .lines()
                    .map(|line| line.trim().trim_start_matches('-').trim())
                    .filter(|item| !item.is_empty())
                    .map(|item| format!("<li>{item}</li>"))
                    .collect();
                format!("<ul>{items}</ul>")
            } else {
                format!("<p>{}</p>", paragraph.trim().replace('\n', "<br/>"))
            }
        })
        .collect()
}

/// File name for an exported itinerary: `Trip to Ella!` → `trip-to-ella.html`.
pub fn export_file_name(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "itinerary.html".to_string()
    } else {
        format!("{slug}.html")
    }
}
