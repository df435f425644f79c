//! Cleanup and structure review of generated itinerary text, run before
//! the text is shown or stored.

use crate::itinerary::count_day_headings;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BREAK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:p|div|span|ul|ol|li|section|article|h[1-6])(?:\s[^>]*)?>").unwrap()
});

static EMPHASIS_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:strong|em|b|i)(?:\s[^>]*)?>").unwrap());

static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\|.*\|[ \t]*(?:\n|$)").unwrap());

static STRAY_PIPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\|\s").unwrap());

static BULLET_GLYPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(?:[•●▪‣○♦✔➤➜→–—]|-{2,})[ \t]*").unwrap());

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static CLAUSE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,.]\s+").unwrap());

/// Sections a complete itinerary is expected to mention, with the words
/// that count as mentioning them.
const EXPECTED_SECTIONS: &[(&str, &[&str])] = &[
    ("Overview", &["overview"]),
    ("Schedule", &["schedule", "timeline"]),
    ("Locations", &["locations", "places"]),
    ("Activities", &["activities", "things to do"]),
    ("Food Suggestions", &["food", "foods", "meals", "restaurants"]),
    ("Budget", &["budget", "cost", "pricing", "expenses"]),
    ("Travel Notes", &["notes", "tips", "travel notes", "guidelines"]),
];

/// Words that make a line a better preview candidate.
const PREVIEW_KEYWORDS: &[&str] = &[
    "beach", "temple", "train", "hike", "food", "market", "drive", "duration", "waterfall",
    "sunrise", "sunset",
];

const PREVIEW_LINES: usize = 5;

const MAX_WORDS_PER_LINE: usize = 22;

/// Text that marks a line as structured (links, prices, times), which is
/// never re-wrapped.
const STRUCTURED_MARKERS: &[&str] = &["http", "www.", "Rs.", "$", "€", "am", "pm"];

/// Outcome of [`review`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    pub cleaned: String,
    pub valid: bool,
    pub missing_sections: Vec<String>,
    pub days_detected: usize,
    pub preview: String,
}

/// Cleans `text`, checks it for the expected sections and builds a short
/// preview.
///
/// ```
/// # use wanderwise_core::review::review;
/// let report = review("<p>Day 1</p><p>Schedule: 08:00 beach walk</p>");
/// assert_eq!(report.days_detected, 1);
/// assert!(!report.valid);
/// assert!(report.missing_sections.contains(&"Budget".to_string()));
/// ```
pub fn review(text: &str) -> ReviewReport {
    let cleaned = clean_full_text(text);
    let days_detected = count_day_headings(&cleaned);
    let cleaned = shorten_sentences(&bulletify_paragraphs(&cleaned), MAX_WORDS_PER_LINE);
    let (valid, missing) = validate_structure(&cleaned);
    let preview = summarize_light(&cleaned, PREVIEW_LINES);
    ReviewReport {
        cleaned,
        valid,
        missing_sections: missing.into_iter().map(str::to_string).collect(),
        days_detected,
        preview,
    }
}

/// Strips HTML, tables, code fences and repeated lines; normalizes bullet
/// glyphs to `- ` and compacts blank lines.
pub fn clean_full_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = remove_html(text);
    let text = TABLE_ROW.replace_all(&text, "");
    let text = STRAY_PIPE.replace_all(&text, " ");
    let text = BULLET_GLYPH.replace_all(&text, "${1}- ");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    remove_duplicate_lines(text.trim())
}

fn remove_html(text: &str) -> String {
    let text = BREAK_TAG.replace_all(text, "\n");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    EMPHASIS_TAG.replace_all(&text, "").into_owned()
}

/// Drops a line identical (after trimming) to the one right before it.
fn remove_duplicate_lines(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut last: Option<&str> = None;
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && last == Some(trimmed) {
            continue;
        }
        kept.push(line);
        last = Some(trimmed);
    }
    kept.join("\n")
}

/// Turns single-line paragraphs of six or more words that are made of
/// comma or semicolon separated clauses into bullet lists.
pub fn bulletify_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            let wordy = paragraph.split_whitespace().count() >= 6;
            let clauses = paragraph.contains(',') || paragraph.contains(';');
            if !wordy || !clauses || paragraph.contains('\n') {
                return paragraph.to_string();
            }
            let parts: Vec<&str> = CLAUSE_BREAK
                .split(paragraph)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            if parts.len() > 1 {
                parts
                    .iter()
                    .map(|part| format!("- {part}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                paragraph.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Wraps lines longer than `max_words` words into lines of at most
/// `max_words` words. Lines containing links, prices or times are kept.
pub fn shorten_sentences(text: &str, max_words: usize) -> String {
    text.split('\n')
        .map(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            if max_words == 0
                || words.len() <= max_words
                || STRUCTURED_MARKERS.iter().any(|marker| line.contains(marker))
            {
                return line.to_string();
            }
            words
                .chunks(max_words)
                .map(|chunk| chunk.join(" "))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns `(valid, missing)`: the expected sections that `text` never
/// mentions.
pub fn validate_structure(text: &str) -> (bool, Vec<&'static str>) {
    let lower = text.to_lowercase();
    let missing: Vec<&'static str> = EXPECTED_SECTIONS
        .iter()
        .filter(|(_, variants)| !variants.iter().any(|variant| lower.contains(variant)))
        .map(|(name, _)| *name)
        .collect();
    (missing.is_empty(), missing)
}

/// Picks the `max_lines` most telling lines: longer lines and lines with
/// travel keywords first.
pub fn summarize_light(text: &str, max_lines: usize) -> String {
    let mut scored: Vec<(usize, &str)> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let lower = line.to_lowercase();
            let bonus = PREVIEW_KEYWORDS
                .iter()
                .filter(|keyword| lower.contains(*keyword))
                .count()
                * 40;
            (line.chars().count() + bonus, line)
        })
        .collect();
    scored.sort_by(|a, b| b.cmp(a));
    scored
        .into_iter()
        .take(max_lines)
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_is_stripped_but_text_kept() {
        let cleaned = clean_full_text("<h2>Day 1</h2><p>Visit <strong>Galle</strong><br/>Fort</p>");
        assert_eq!(cleaned, "Day 1\n\nVisit Galle\nFort");
    }

    #[test]
    fn tables_and_code_fences_are_removed() {
        let text = "Intro\n| a | b |\n|---|---|\n| 1 | 2 |\nAfter\n```\ncode\n```\nuse `kottu`";
        assert_eq!(clean_full_text(text), "Intro\nAfter\n\nuse kottu");
    }

    #[test]
    fn bullet_glyphs_become_dashes_only_at_line_start() {
        let text = "• Temple\n  ➤ Lake\n-- Market\nTrain 06:30–08:00";
        assert_eq!(
            clean_full_text(text),
            "- Temple\n  - Lake\n- Market\nTrain 06:30–08:00"
        );
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        assert_eq!(clean_full_text("a\na\n\nb\nb\nb\na"), "a\n\nb\na");
    }

    #[test]
    fn empty_text_cleans_to_empty() {
        assert_eq!(clean_full_text(""), "");
    }

    #[test]
    fn bulletify_splits_clause_lists() {
        let text = "Short one, two\n\nPack sunscreen, a hat, light clothes; and water.";
        assert_eq!(
            bulletify_paragraphs(text),
            "Short one, two\n\n- Pack sunscreen\n- a hat\n- light clothes\n- and water."
        );
    }

    #[test]
    fn bulletify_leaves_multi_line_paragraphs() {
        let text = "Day 1 - Colombo\nWalk, eat, shop, sleep, repeat, rest";
        assert_eq!(bulletify_paragraphs(text), text);
    }

    #[test]
    fn long_lines_are_wrapped() {
        let long = vec!["walk"; 30].join(" ");
        let wrapped = shorten_sentences(&format!("Day 1\n{long}"), 22);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].split_whitespace().count(), 22);
        assert_eq!(lines[2].split_whitespace().count(), 8);
    }

    #[test]
    fn structured_long_lines_are_kept() {
        let priced = format!("{} costs $40", vec!["walk"; 30].join(" "));
        assert_eq!(shorten_sentences(&priced, 22), priced);
        assert_eq!(shorten_sentences("short line", 22), "short line");
    }

    #[test]
    fn validate_reports_missing_sections() {
        let (valid, missing) = validate_structure("Overview\nSchedule\nPlaces\nThings to do");
        assert!(!valid);
        assert_eq!(missing, ["Food Suggestions", "Budget", "Travel Notes"]);

        let full = "overview timeline locations activities meals cost tips";
        assert_eq!(validate_structure(full), (true, vec![]));
    }

    #[test]
    fn preview_prefers_keyword_lines() {
        let text = "A fairly long line about nothing much at all\nBeach\nSunrise hike\nok";
        assert_eq!(summarize_light(text, 2), "Sunrise hike\nBeach");
        assert_eq!(summarize_light("", 3), "");
    }

    #[test]
    fn review_counts_days_before_bulletify() {
        let text = "Day 1\nKandy, temple, lake, tea, dance, market\n\nDay 2\nElla";
        let report = review(text);
        assert_eq!(report.days_detected, 2);
        assert!(report.preview.contains("temple"));
    }
}
