use crate::Config;
use crate::config::DEFAULT_DATE_FORMAT;
use crate::itinerary::DEFAULT_SUMMARY_MIN_CHARS;
use crate::sections::SectionLabels;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(export_dir: PathBuf) -> Config {
    Config {
        export_dir,
        editor: None,
        date_format: DEFAULT_DATE_FORMAT.to_string(),
        summary_min_chars: DEFAULT_SUMMARY_MIN_CHARS,
        section_labels: SectionLabels::default(),
    }
}
