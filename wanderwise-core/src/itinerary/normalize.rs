//! Cleanup of raw generated text before it is segmented.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// C0/C1 controls (except tab and line feed), zero-width characters and BOM.
static INVISIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{00}-\x{08}\x{0B}-\x{1F}\x{7F}-\x{9F}\x{200B}-\x{200F}\x{FEFF}]").unwrap()
});

/// Clusters of mis-decoded bytes and other symbol garbage.
static SYMBOL_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{P}\s]{2,}").unwrap());

/// A lone symbol. Currency signs are kept so prices survive.
static STRAY_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{P}\p{Sc}\s]").unwrap());

static BOLD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{3,}").unwrap());
static HEADING_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{3,}[ \t]*").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static PARAGRAPH_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes raw generated itinerary text.
///
/// Folds to NFC, blanks out control and zero-width characters, drops
/// symbol garbage, caps emphasis at `**` and headings at `###`, collapses
/// blanks, trims every line and keeps at most one blank line between
/// paragraphs. Never fails; running it on its own output changes nothing.
///
/// ```
/// # use wanderwise_core::itinerary::normalize;
/// let raw = "  ####Day 1\u{200B}:   Arrival  \r\n\r\n\r\n\r\n***Welcome***";
/// assert_eq!(normalize(raw), "### Day 1 : Arrival\n\n**Welcome**");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text: String = text.replace("\r\n", "\n").nfc().collect();
    let text = INVISIBLE.replace_all(&text, " ");
    let text = SYMBOL_RUN.replace_all(&text, " ");
    let text = drop_stray_symbols(&text);
    let text = BOLD_RUN.replace_all(&text, "**");
    let text = HEADING_RUN.replace_all(&text, "### ");
    let text = BLANK_RUN.replace_all(&text, " ");
    let text = text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    let text = PARAGRAPH_GAP.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Blanks a single symbol that opens a word (preceded by start of text or
/// whitespace, followed by a non-blank character).
fn drop_stray_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for symbol in STRAY_SYMBOL.find_iter(text) {
        let opens_word = text[..symbol.start()]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let leads_word = text[symbol.end()..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace());
        if opens_word && leads_word {
            out.push_str(&text[last..symbol.start()]);
            out.push(' ');
            last = symbol.end();
        }
    }
    out.push_str(&text[last..]);
    out
}
