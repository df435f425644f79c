//! Labelled sub-sections inside a day (Schedule, Locations, ...) and the
//! registry of heading labels that introduce them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Section {
    Schedule,
    Locations,
    Activities,
    Food,
    Budget,
    Notes,
}

impl Section {
    /// Returns `true` if `word` names a section directly (eg "food", "Notes").
    pub fn is_canonical(word: &str) -> bool {
        Section::iter().any(|section| section.as_ref().eq_ignore_ascii_case(word.trim()))
    }
}

/// Heading labels recognized out of the box, in lookup order.
const DEFAULT_LABELS: &[(&str, Section)] = &[
    ("Schedule", Section::Schedule),
    ("Timeline", Section::Schedule),
    ("Itinerary", Section::Schedule),
    ("Locations", Section::Locations),
    ("Places to Visit", Section::Locations),
    ("Places", Section::Locations),
    ("Activities", Section::Activities),
    ("Things to Do", Section::Activities),
    ("Food Suggestions", Section::Food),
    ("Food", Section::Food),
    ("Foods", Section::Food),
    ("Meals", Section::Food),
    ("Restaurants", Section::Food),
    ("Budget", Section::Budget),
    ("Costs", Section::Budget),
    ("Cost", Section::Budget),
    ("Pricing", Section::Budget),
    ("Expenses", Section::Budget),
    ("Travel Notes", Section::Notes),
    ("Notes", Section::Notes),
    ("Additional Tips", Section::Notes),
    ("Tips", Section::Notes),
    ("Guidelines", Section::Notes),
];

/// Emoji that generators put in front of section headings.
const SECTION_MARKERS: &[char] = &['🕒', '📍', '🎯', '🍽', '💸', '📝'];

static DEFAULT_REGISTRY: Lazy<SectionLabels> = Lazy::new(|| {
    let labels = DEFAULT_LABELS
        .iter()
        .map(|(label, section)| (label.to_string(), *section))
        .collect();
    SectionLabels::from_labels(labels)
});

static MARKDOWN_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}(?:\s|$)").unwrap());

static LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\*\*|__)?[A-Z][A-Za-z0-9 &/'-]{1,40}(?:\*\*|__)?:(?:\*\*|__)?$").unwrap()
});

/// Ordered table of heading labels (label → section).
///
/// The defaults cover what common generators emit; `[sections]` in
/// `config.toml` adds more through [`extend`](Self::extend). Lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct SectionLabels {
    labels: Vec<(String, Section)>,
    /// Heading matcher per section, built with the table.
    headings: Vec<(Section, Regex)>,
    /// Matches a line introducing any registered section.
    any_heading: Option<Regex>,
}

impl Default for SectionLabels {
    fn default() -> Self {
        DEFAULT_REGISTRY.clone()
    }
}

impl SectionLabels {
    /// The built-in registry, shared and never mutated.
    pub fn defaults() -> &'static SectionLabels {
        &DEFAULT_REGISTRY
    }

    fn from_labels(labels: Vec<(String, Section)>) -> Self {
        let names: Vec<&str> = labels.iter().map(|(label, _)| label.as_str()).collect();
        let any_heading = heading_regex(&names);
        let headings = Section::iter()
            .filter_map(|section| {
                let names: Vec<&str> = labels
                    .iter()
                    .filter(|(_, s)| *s == section)
                    .map(|(label, _)| label.as_str())
                    .collect();
                heading_regex(&names).map(|heading| (section, heading))
            })
            .collect();
        Self {
            labels,
            headings,
            any_heading,
        }
    }

    /// Adds user-defined synonyms.
    ///
    /// Each pair is `(alias, target)`. `target` is either a section name
    /// (`"food"`) or a label already in the table (`"Travel Notes"`). Pairs
    /// whose target resolves to nothing, whose alias is a section name, or
    /// whose alias is already registered are skipped silently.
    ///
    /// ```
    /// # use wanderwise_core::sections::{Section, SectionLabels};
    /// let mut labels = SectionLabels::default();
    /// labels.extend(&[("Where to Eat".into(), "food".into())]);
    /// assert!(labels.labels_for(Section::Food).contains(&"Where to Eat"));
    /// ```
    pub fn extend(&mut self, synonyms: &[(String, String)]) {
        let mut changed = false;
        for (alias, target) in synonyms {
            let alias = alias.trim();
            if alias.is_empty() || Section::is_canonical(alias) || self.resolve(alias).is_some() {
                continue;
            }
            if let Some(section) = self.resolve(target) {
                self.labels.push((alias.to_string(), section));
                changed = true;
            }
        }
        if changed {
            let labels = std::mem::take(&mut self.labels);
            *self = Self::from_labels(labels);
        }
    }

    /// Resolves a section name or a registered label to its section.
    pub fn resolve(&self, word: &str) -> Option<Section> {
        let word = word.trim();
        Section::from_str(word).ok().or_else(|| {
            self.labels
                .iter()
                .find(|(label, _)| label.eq_ignore_ascii_case(word))
                .map(|(_, section)| *section)
        })
    }

    pub fn labels_for(&self, section: Section) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|(_, s)| *s == section)
            .map(|(label, _)| label.as_str())
            .collect()
    }

    /// Extracts the text of `section` from a day body, using every label
    /// registered for it.
    pub fn extract(&self, body: &str, section: Section) -> Option<String> {
        let (_, heading) = self.headings.iter().find(|(s, _)| *s == section)?;
        self.extract_under(body, heading)
    }

    /// Extracts the text under the first heading whose label is one of
    /// `names`.
    ///
    /// The heading may carry `#` markers, bold markers or an emoji, and must
    /// be followed by a colon or the end of its line. Text written after the
    /// colon on the same line belongs to the section. The section runs until
    /// the next heading line (see [`is_heading_line`](Self::is_heading_line))
    /// or the end of the body.
    pub fn extract_named(&self, body: &str, names: &[&str]) -> Option<String> {
        let heading = heading_regex(names)?;
        self.extract_under(body, &heading)
    }

    fn extract_under(&self, body: &str, heading: &Regex) -> Option<String> {
        let body = body.replace("\r\n", "\n");
        let found = heading.find(&body)?;

        let mut lines = body[found.end()..].split('\n');
        let mut kept: Vec<&str> = lines.next().into_iter().collect();
        let mut after_blank = false;
        for line in lines {
            if self.is_heading_line(line, after_blank) {
                break;
            }
            after_blank = line.trim().is_empty();
            kept.push(line);
        }
        Some(kept.join("\n").trim().to_string())
    }

    /// Whether `line` opens a new block: a markdown heading, a registered
    /// section heading, a section emoji marker, or (after a blank line) a
    /// short capitalized `Label:` line.
    pub fn is_heading_line(&self, line: &str, after_blank: bool) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        MARKDOWN_HEADING.is_match(line)
            || line.starts_with(SECTION_MARKERS)
            || self
                .any_heading
                .as_ref()
                .is_some_and(|heading| heading.is_match(line))
            || (after_blank && LABEL_LINE.is_match(line))
    }
}

/// Extracts a labelled sub-section from a day body using the built-in
/// registry to find where the section ends.
///
/// ```
/// # use wanderwise_core::sections::extract_section;
/// let body = "Intro line\nLocations:\n- Galle Fort\n- Unawatuna\nNotes\nBring water";
/// assert_eq!(
///     extract_section(body, &["Locations"]).as_deref(),
///     Some("- Galle Fort\n- Unawatuna")
/// );
/// assert_eq!(extract_section(body, &["Budget"]), None);
/// ```
pub fn extract_section(body: &str, section_names: &[&str]) -> Option<String> {
    SectionLabels::defaults().extract_named(body, section_names)
}

fn heading_regex(names: &[&str]) -> Option<Regex> {
    let alternatives: Vec<String> = names
        .iter()
        .map(|name| label_pattern(name))
        .filter(|pattern| !pattern.is_empty())
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    let pattern = format!(
        r"(?im)^[ \t]*(?:#{{1,6}}[ \t]*)?(?:\*\*|__)?[ \t]*(?:[\p{{So}}\p{{Sk}}]\x{{FE0F}}?[ \t]*)?(?:{})[ \t]*(?:\*\*|__)?[ \t]*(?::[ \t]*(?:\*\*|__)?|$)",
        alternatives.join("|")
    );
    Regex::new(&pattern).ok()
}

/// Escapes a label, letting any run of blanks stand for its inner spaces.
fn label_pattern(label: &str) -> String {
    label
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[ \t]+")
}
