//! Splits itinerary text into one block per trip day.

use once_cell::sync::Lazy;
use regex::Regex;

/// Header of the block holding whatever precedes the first day heading.
pub const OVERVIEW: &str = "Overview";

/// `Day 3`, `## Day 03: Ella`, `🌅 **Itinerary Day 2 – Kandy**`, `Day One`...
static DAY_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:#{1,6}\s*)?(?:[\p{So}\p{Sk}]\x{FE0F}?\s*)?(?:\*\*|__)?\s*(?:itinerary\s+)?day\s*[-:–—]?\s*(\d{1,2}|one|two|three|four|five|six|seven|eight|nine|ten)\b(?:\s*[-:–—|,]+\s*|\s+)?(.*)$",
    )
    .unwrap()
});

const WRITTEN_NUMBERS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// A contiguous slice of itinerary text attributed to one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySegment {
    /// `Day N`, `Day N — Title`, or [`OVERVIEW`].
    pub header: String,
    /// Day number taken from the heading; `None` for the overview block.
    pub day: Option<u32>,
    /// Lines between this heading and the next one, untouched.
    pub body: String,
}

#[derive(Debug, PartialEq, Eq)]
struct DayHeading {
    day: u32,
    title: String,
}

impl DayHeading {
    fn header(&self) -> String {
        if self.title.is_empty() {
            format!("Day {}", self.day)
        } else {
            format!("Day {} — {}", self.day, self.title)
        }
    }
}

/// Parses a single (trimmed) line as a day heading.
fn match_day_heading(line: &str) -> Option<DayHeading> {
    let caps = DAY_HEADING.captures(line)?;
    let number = caps.get(1)?.as_str();
    let day = number.parse::<u32>().ok().or_else(|| {
        WRITTEN_NUMBERS
            .iter()
            .position(|word| word.eq_ignore_ascii_case(number))
            .map(|index| index as u32 + 1)
    })?;
    let title = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .trim_matches(|c: char| {
                    c.is_whitespace() || matches!(c, '*' | '_' | '-' | '–' | '—' | ':' | '|' | ',')
                })
                .to_string()
        })
        .unwrap_or_default();
    Some(DayHeading { day, title })
}

/// Returns `true` if `line` is a day heading such as `## Day 2 - Kandy`.
pub fn is_day_heading(line: &str) -> bool {
    match_day_heading(line.trim()).is_some()
}

/// Number of day heading lines in `text`.
pub fn count_day_headings(text: &str) -> usize {
    text.lines().filter(|line| is_day_heading(line)).count()
}

/// Splits normalized text into ordered day segments.
///
/// Every heading line starts a new segment; the heading itself is consumed
/// and every other line lands, unchanged, in the body of the segment it
/// follows. Text before the first heading becomes an [`OVERVIEW`] segment
/// when it holds anything but blank lines. Text without headings (including
/// empty text) comes back as a single overview segment, so the result is
/// never empty.
///
/// ```
/// # use wanderwise_core::itinerary::split_into_days;
/// let days = split_into_days("Two days in the hills\n## Day 1 - Kandy\nTemple\nDay 2\nTea estate");
/// let headers: Vec<&str> = days.iter().map(|d| d.header.as_str()).collect();
/// assert_eq!(headers, ["Overview", "Day 1 — Kandy", "Day 2"]);
/// assert_eq!(days[1].body, "Temple");
/// ```
pub fn split_into_days(text: &str) -> Vec<DaySegment> {
    let mut segments = Vec::new();
    let mut header = OVERVIEW.to_string();
    let mut day: Option<u32> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        match match_day_heading(line.trim()) {
            Some(heading) => {
                push_segment(&mut segments, &header, day, &lines);
                header = heading.header();
                day = Some(heading.day);
                lines.clear();
            }
            None => lines.push(line),
        }
    }
    push_segment(&mut segments, &header, day, &lines);

    if segments.is_empty() {
        segments.push(DaySegment {
            header: OVERVIEW.to_string(),
            day: None,
            body: text.to_string(),
        });
    }
    segments
}

/// Day segments are always kept; the overview only when it has text.
fn push_segment(segments: &mut Vec<DaySegment>, header: &str, day: Option<u32>, lines: &[&str]) {
    let has_text = lines.iter().any(|line| !line.trim().is_empty());
    if day.is_some() || has_text {
        segments.push(DaySegment {
            header: header.to_string(),
            day,
            body: lines.join("\n"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(text: &str) -> Vec<String> {
        split_into_days(text).into_iter().map(|s| s.header).collect()
    }

    #[test]
    fn heading_variants_are_recognized() {
        let cases = [
            ("Day 1", Some((1, ""))),
            ("day 2: Kandy", Some((2, "Kandy"))),
            ("## Day 3 – Ella", Some((3, "Ella"))),
            ("###Day04-Yala", Some((4, "Yala"))),
            ("Itinerary Day 5 — Galle Fort", Some((5, "Galle Fort"))),
            ("🌅 Day 6 Mirissa", Some((6, "Mirissa"))),
            ("**Day 7: Departure**", Some((7, "Departure"))),
            ("Day Two - Sigiriya", Some((2, "Sigiriya"))),
            ("Day 123", None),
            ("Daylight saving", None),
            ("Days 3-4 are free", None),
            ("A day 1 trip", None),
        ];
        for (line, expected) in cases {
            let got = match_day_heading(line).map(|h| (h.day, h.title));
            let expected = expected.map(|(d, t)| (d, t.to_string()));
            assert_eq!(got, expected, "line: {line}");
        }
    }

    #[test]
    fn header_uses_em_dash_between_number_and_title() {
        assert_eq!(headers("Day 1 - Colombo\nwalk"), ["Day 1 — Colombo"]);
        assert_eq!(headers("Day 01\nwalk"), ["Day 1"]);
    }

    #[test]
    fn overview_precedes_first_day_when_it_has_text() {
        let days = split_into_days("Welcome to Sri Lanka\n\nDay 1\nBeach");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].header, OVERVIEW);
        assert_eq!(days[0].day, None);
        assert_eq!(days[0].body, "Welcome to Sri Lanka\n");
        assert_eq!(days[1].day, Some(1));
    }

    #[test]
    fn blank_overview_is_dropped() {
        assert_eq!(headers("\n\nDay 1\nBeach\nDay 2\nHills"), ["Day 1", "Day 2"]);
    }

    #[test]
    fn day_without_body_is_kept() {
        let days = split_into_days("Day 1\nDay 2\nHills");
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].body, "");
        assert_eq!(days[1].body, "Hills");
    }

    #[test]
    fn text_without_headings_is_one_overview() {
        let days = split_into_days("Just relax\nby the sea");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].header, OVERVIEW);
        assert_eq!(days[0].body, "Just relax\nby the sea");
    }

    #[test]
    fn empty_text_gives_one_empty_segment() {
        let days = split_into_days("");
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].header, OVERVIEW);
        assert!(days[0].body.is_empty());
    }

    #[test]
    fn day_numbers_keep_source_order() {
        let text = "Day 1\na\n## Day 2\nb\nDay 3 - End\nc\nDay 10\nd";
        let days: Vec<Option<u32>> = split_into_days(text).iter().map(|s| s.day).collect();
        assert_eq!(days, [Some(1), Some(2), Some(3), Some(10)]);
    }

    #[test]
    fn bodies_and_headings_rebuild_the_text() {
        let text = "Intro\nDay 1 - A\nx\ny\nDay 2\nz";
        let rebuilt: Vec<String> = split_into_days(text)
            .into_iter()
            .map(|s| s.body)
            .collect();
        assert_eq!(rebuilt, ["Intro", "x\ny", "z"]);
    }

    #[test]
    fn counts_heading_lines() {
        assert_eq!(count_day_headings("Day 1\nfoo\n### Day 2: bar\nDay trip"), 2);
        assert_eq!(count_day_headings(""), 0);
    }
}
