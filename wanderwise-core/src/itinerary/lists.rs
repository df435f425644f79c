//! Turns extracted section text into lists and schedule items.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `-`, `*` or `•` opening a list item. A `*` needs a following blank so
/// that `**bold**` items keep their markers.
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-\s*|\*(?:\s+|$)|•\s*)").unwrap());

/// `06:30`, `6.30 pm`, `06:30–08:00`, `9:00 to 10:30`...
static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,2}[:.]\d{2}(?:\s?[ap]m\b)?(?:\s*(?:[-–—]+|to)\s*\d{1,2}[:.]\d{2}(?:\s?[ap]m\b)?)?",
    )
    .unwrap()
});

/// Separators and markers left in front of a description once the time is cut out.
static LEADING_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-–—:*•\s]+").unwrap());

static DASH_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[–—-]\s+").unwrap());

/// Input accepted by the list parsers: nothing, a block of text, or items
/// that are already split.
#[derive(Debug, Clone, Copy, Default)]
pub enum ListSource<'a> {
    #[default]
    Empty,
    Text(&'a str),
    Items(&'a [String]),
}

impl<'a> From<&'a str> for ListSource<'a> {
    fn from(text: &'a str) -> Self {
        ListSource::Text(text)
    }
}

impl<'a> From<Option<&'a str>> for ListSource<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(ListSource::Empty, ListSource::Text)
    }
}

impl<'a> From<&'a [String]> for ListSource<'a> {
    fn from(items: &'a [String]) -> Self {
        ListSource::Items(items)
    }
}

impl<'a> From<&'a Vec<String>> for ListSource<'a> {
    fn from(items: &'a Vec<String>) -> Self {
        ListSource::Items(items.as_slice())
    }
}

/// One line of a day's schedule. `time` is empty when the line has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub text: String,
}

impl fmt::Display for ScheduleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.time.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{} {}", self.time, self.text)
        }
    }
}

/// Parses a bullet or comma list.
///
/// A single line containing commas is split on commas, anything else on
/// newlines. Leading bullets are stripped, items trimmed, empty items
/// dropped.
///
/// ```
/// # use wanderwise_core::itinerary::parse_list;
/// assert_eq!(parse_list("a, b, c"), ["a", "b", "c"]);
/// assert_eq!(parse_list("- a\n- b\n* c"), ["a", "b", "c"]);
/// assert!(parse_list(None::<&str>).is_empty());
/// ```
pub fn parse_list<'a>(input: impl Into<ListSource<'a>>) -> Vec<String> {
    match input.into() {
        ListSource::Empty => Vec::new(),
        ListSource::Items(items) => items.iter().filter_map(|item| clean_item(item)).collect(),
        ListSource::Text(text) if !text.contains('\n') && text.contains(',') => {
            text.split(',').filter_map(clean_item).collect()
        }
        ListSource::Text(text) => text.split('\n').filter_map(clean_item).collect(),
    }
}

/// Like [`parse_list`] but never splits on commas; for prose such as notes.
pub fn parse_lines<'a>(input: impl Into<ListSource<'a>>) -> Vec<String> {
    match input.into() {
        ListSource::Empty => Vec::new(),
        ListSource::Items(items) => items.iter().filter_map(|item| clean_item(item)).collect(),
        ListSource::Text(text) => text.split('\n').filter_map(clean_item).collect(),
    }
}

/// Parses schedule lines into `{time, text}` items.
///
/// Per non-empty line, in order: a time or time range anywhere in the line
/// (the rest becomes the text), a bullet (no time), a digit-led
/// `prefix – rest` (prefix becomes the time), or the whole line as text.
///
/// ```
/// # use wanderwise_core::itinerary::parse_schedule;
/// let items = parse_schedule("06:30–08:00 Sunrise at the temple\nJust a plain line");
/// assert_eq!(items[0].time, "06:30–08:00");
/// assert_eq!(items[0].text, "Sunrise at the temple");
/// assert_eq!(items[1].time, "");
/// assert_eq!(items[1].text, "Just a plain line");
/// ```
pub fn parse_schedule<'a>(input: impl Into<ListSource<'a>>) -> Vec<ScheduleItem> {
    let lines: Vec<&str> = match input.into() {
        ListSource::Empty => Vec::new(),
        ListSource::Items(items) => items.iter().map(|item| item.trim()).collect(),
        ListSource::Text(text) => text.split('\n').map(str::trim).collect(),
    };
    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .map(schedule_item)
        .collect()
}

/// First time in `line` that is not the tail of a number like `1,200.00`.
fn find_time(line: &str) -> Option<regex::Match<'_>> {
    TIME_RANGE
        .find_iter(line)
        .find(|time| !line[..time.start()].ends_with([',', '.']))
}

fn schedule_item(line: &str) -> ScheduleItem {
    if let Some(time) = find_time(line) {
        let rest = format!("{}{}", &line[..time.start()], &line[time.end()..]);
        let text = LEADING_JUNK.replace(&rest, "").trim().to_string();
        return ScheduleItem {
            time: time.as_str().trim().to_string(),
            text: if text.is_empty() { line.to_string() } else { text },
        };
    }
    if BULLET.is_match(line) {
        return ScheduleItem {
            time: String::new(),
            text: strip_bullet(line).trim().to_string(),
        };
    }
    let mut parts = DASH_SEPARATOR.splitn(line, 2);
    if let (Some(prefix), Some(rest)) = (parts.next(), parts.next()) {
        if prefix.starts_with(|c: char| c.is_ascii_digit()) {
            return ScheduleItem {
                time: prefix.trim().to_string(),
                text: rest.trim().to_string(),
            };
        }
    }
    ScheduleItem {
        time: String::new(),
        text: line.to_string(),
    }
}

fn strip_bullet(item: &str) -> &str {
    BULLET.find(item).map_or(item, |bullet| &item[bullet.end()..])
}

fn clean_item(item: &str) -> Option<String> {
    let item = strip_bullet(item.trim()).trim();
    (!item.is_empty()).then(|| item.to_string())
}
