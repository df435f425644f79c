//! Builds typed day objects from raw generated itinerary text.

use super::images::find_images;
use super::lists::{ScheduleItem, parse_lines, parse_list, parse_schedule};
use super::normalize::normalize;
use super::segment::{DaySegment, split_into_days};
use crate::sections::{Section, SectionLabels};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A summary must be longer than this many characters by default.
pub const DEFAULT_SUMMARY_MIN_CHARS: usize = 10;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// The parsed representation of one trip day.
///
/// Every list is a best-effort extraction and is empty when the day has no
/// matching heading. `raw` keeps the day's text for fallback display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDay {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub schedule: Vec<ScheduleItem>,
    pub locations: Vec<String>,
    pub activities: Vec<String>,
    pub food: Vec<String>,
    pub budget: Vec<String>,
    pub notes: Vec<String>,
    pub images: Vec<String>,
    pub raw: String,
}

impl StructuredDay {
    /// `true` when nothing but the raw text could be recovered.
    pub fn is_unstructured(&self) -> bool {
        self.locations.is_empty()
            && self.activities.is_empty()
            && self.food.is_empty()
            && self.budget.is_empty()
            && self.notes.is_empty()
            && self.schedule.iter().all(|item| item.time.is_empty())
    }
}

/// Configuration options for [`parse_itinerary`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// Heading labels to look for. Defaults to the built-in registry.
    pub labels: Option<&'a SectionLabels>,
    /// Paragraphs this short or shorter are skipped when picking a summary.
    pub summary_min_chars: Option<usize>,
}

/// Parses raw generated itinerary text into ordered day objects.
///
/// The text is normalized, split into days, and every day is searched for
/// its Schedule, Locations, Activities, Food, Budget and Notes sections. When
/// a day has no schedule section its whole body is read as a schedule.
/// Blank input gives an empty vector; anything else gives at least one day.
///
/// ```
/// # use wanderwise_core::itinerary::parse_itinerary;
/// let raw = "Day 1 - Colombo\nSchedule\n06:30–08:00 Sunrise walk\nLocations\n- Galle Face Green";
/// let days = parse_itinerary(raw, None);
/// assert_eq!(days[0].title, "Day 1 — Colombo");
/// assert_eq!(days[0].schedule[0].text, "Sunrise walk");
/// assert_eq!(days[0].locations, ["Galle Face Green"]);
/// ```
pub fn parse_itinerary(raw: &str, options: Option<ParseOptions>) -> Vec<StructuredDay> {
    let options = options.unwrap_or_default();
    let labels = options.labels.unwrap_or_else(|| SectionLabels::defaults());
    let summary_min_chars = options
        .summary_min_chars
        .unwrap_or(DEFAULT_SUMMARY_MIN_CHARS);

    let text = normalize(raw);
    if text.is_empty() {
        debug!("nothing to parse after normalization");
        return Vec::new();
    }

    let days: Vec<StructuredDay> = split_into_days(&text)
        .iter()
        .enumerate()
        .map(|(index, segment)| build_day(index, segment, labels, summary_min_chars))
        .collect();
    debug!(
        days = days.len(),
        raw_len = raw.len(),
        normalized_len = text.len(),
        "parsed itinerary"
    );
    days
}

/// Builds the structured form of the `index`-th segment.
pub fn build_day(
    index: usize,
    segment: &DaySegment,
    labels: &SectionLabels,
    summary_min_chars: usize,
) -> StructuredDay {
    let body = segment.body.trim();
    let section = |section: Section| labels.extract(body, section);

    let schedule_text = section(Section::Schedule).filter(|text| !text.is_empty());
    let title = if segment.header.trim().is_empty() {
        format!("Day {}", index + 1)
    } else {
        segment.header.clone()
    };

    StructuredDay {
        id: format!("day-{}", index + 1),
        title,
        summary: first_paragraph(body, summary_min_chars),
        schedule: parse_schedule(schedule_text.as_deref().unwrap_or(body)),
        locations: parse_list(section(Section::Locations).as_deref()),
        activities: parse_list(section(Section::Activities).as_deref()),
        food: parse_list(section(Section::Food).as_deref()),
        budget: parse_list(section(Section::Budget).as_deref()),
        notes: parse_lines(section(Section::Notes).as_deref()),
        images: find_images(body),
        raw: body.to_string(),
    }
}

/// First paragraph longer than `min_chars`, or an empty string.
fn first_paragraph(body: &str, min_chars: usize) -> String {
    PARAGRAPH_BREAK
        .split(body)
        .map(str::trim)
        .find(|paragraph| paragraph.chars().count() > min_chars)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DAYS: &str = "Day 1 - Colombo
Schedule
06:30–08:00 Sunrise walk
Locations
- Galle Face Green
Activities
- City tour
Day 2 - Kandy
Schedule
09:00–10:00 Temple visit";

    #[test]
    fn two_day_itinerary() {
        let days = parse_itinerary(TWO_DAYS, None);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].id, "day-1");
        assert_eq!(days[0].title, "Day 1 — Colombo");
        assert_eq!(
            days[0].schedule,
            [ScheduleItem {
                time: "06:30–08:00".into(),
                text: "Sunrise walk".into()
            }]
        );
        assert_eq!(days[0].locations, ["Galle Face Green"]);
        assert_eq!(days[0].activities, ["City tour"]);

        assert_eq!(days[1].id, "day-2");
        assert_eq!(days[1].title, "Day 2 — Kandy");
        assert_eq!(
            days[1].schedule,
            [ScheduleItem {
                time: "09:00–10:00".into(),
                text: "Temple visit".into()
            }]
        );
        assert!(days[1].locations.is_empty());
        assert!(days[1].activities.is_empty());
    }

    #[test]
    fn blank_input_gives_no_days() {
        assert!(parse_itinerary("", None).is_empty());
        assert!(parse_itinerary(" \u{200B}\n\t", None).is_empty());
    }

    #[test]
    fn text_without_structure_is_one_overview_day() {
        let days = parse_itinerary("Relax on the beach all week.", None);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].title, "Overview");
        assert_eq!(days[0].summary, "Relax on the beach all week.");
        assert_eq!(days[0].schedule.len(), 1);
        assert!(days[0].is_unstructured());
    }

    #[test]
    fn all_sections_are_filled() {
        let raw = "## Day 3: Ella

A slow day in the hills with tea and views.

### 🕒 Schedule
- 07:00 Little Adam's Peak
- 12:00 – 13:00 Lunch

**Locations:** Nine Arch Bridge, Ella Rock

Activities:
- Hiking
- Train ride

Food Suggestions
- Cafe Chill (mid)

Budget: $30-$50

Travel Notes
Start early, it gets hot.
![view](https://img.example.com/ella.jpg)";
        let days = parse_itinerary(raw, None);
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.title, "Day 3 — Ella");
        assert_eq!(day.summary, "A slow day in the hills with tea and views.");
        assert_eq!(day.schedule.len(), 2);
        assert_eq!(day.schedule[0].time, "07:00");
        assert_eq!(day.schedule[0].text, "Little Adam's Peak");
        assert_eq!(day.schedule[1].time, "12:00 – 13:00");
        assert_eq!(day.locations, ["Nine Arch Bridge", "Ella Rock"]);
        assert_eq!(day.activities, ["Hiking", "Train ride"]);
        assert_eq!(day.food, ["Cafe Chill (mid)"]);
        assert_eq!(day.budget, ["$30-$50"]);
        assert_eq!(
            day.notes,
            ["Start early, it gets hot.", "![view](https://img.example.com/ella.jpg)"]
        );
        assert_eq!(day.images, ["https://img.example.com/ella.jpg"]);
        assert!(!day.is_unstructured());
    }

    #[test]
    fn missing_schedule_reads_whole_body() {
        let days = parse_itinerary("Day 1\n08:00 Breakfast\n- Beach time", None);
        assert_eq!(days[0].schedule.len(), 2);
        assert_eq!(days[0].schedule[0].time, "08:00");
        assert_eq!(days[0].schedule[1].text, "Beach time");
    }

    #[test]
    fn custom_labels_and_summary_length() {
        let mut labels = SectionLabels::default();
        labels.extend(&[("Eats".into(), "food".into())]);
        let options = ParseOptions {
            labels: Some(&labels),
            summary_min_chars: Some(40),
        };
        let raw = "Day 1\nShort intro.\n\nEats\n- Kottu";
        let days = parse_itinerary(raw, Some(options));
        assert_eq!(days[0].food, ["Kottu"]);
        assert_eq!(days[0].summary, "");
    }

    #[test]
    fn days_serialize_to_json() {
        let days = parse_itinerary(TWO_DAYS, None);
        let json = serde_json::to_value(&days).unwrap();
        assert_eq!(json[0]["schedule"][0]["time"], "06:30–08:00");
        let back: Vec<StructuredDay> = serde_json::from_value(json).unwrap();
        assert_eq!(back, days);
    }
}
