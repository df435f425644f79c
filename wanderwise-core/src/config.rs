use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};
use tracing::{debug, warn};

use crate::itinerary::{DEFAULT_SUMMARY_MIN_CHARS, ParseOptions};
use crate::sections::{Section, SectionLabels};

pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where `--export` writes HTML files when no path is given.
    pub export_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// chrono format for the "Exported on" line of HTML exports.
    pub date_format: String,
    /// Paragraphs this short or shorter are never picked as a day summary.
    pub summary_min_chars: usize,
    /// Built-in heading labels plus the `[sections]` table.
    pub section_labels: SectionLabels,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    export_dir: Option<PathBuf>,
    editor: Option<String>,
    date_format: Option<String>,
    summary_min_chars: Option<usize>,
    /// Optional table:
    /// [sections]
    /// "Where to Eat" = "food"
    /// "Good to Know" = "Travel Notes"
    sections: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// A config file that cannot be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::config_file_paths()))
    }

    /// Loads the first existing file of `paths`, falling back to defaults
    /// when it cannot be read or parsed.
    fn load_from(paths: &[PathBuf]) -> Self {
        let file_config = Self::read_file_config(paths).unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Self::from_file_config(file_config)
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let date_format = file_config
            .date_format
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        let export_dir = file_config
            .export_dir
            .unwrap_or_else(Self::default_export_dir);

        let mut section_labels = SectionLabels::default();
        Self::load_sections(&mut section_labels, &file_config.sections);

        Self {
            export_dir,
            editor: file_config.editor,
            date_format,
            summary_min_chars: file_config
                .summary_min_chars
                .unwrap_or(DEFAULT_SUMMARY_MIN_CHARS),
            section_labels,
        }
    }

    /// Options for [`parse_itinerary`](crate::itinerary::parse_itinerary)
    /// carrying this config's labels and summary length.
    pub fn parse_options(&self) -> ParseOptions<'_> {
        ParseOptions {
            labels: Some(&self.section_labels),
            summary_min_chars: Some(self.summary_min_chars),
        }
    }

    /// Default export root: `{data_dir}/wanderwise/exports`
    /// - macOS:   `~/Library/Application Support/wanderwise/exports`
    /// - Linux:   `$XDG_DATA_HOME/wanderwise/exports` or `~/.local/share/wanderwise/exports`
    /// - Windows: `%APPDATA%\wanderwise\exports`
    fn default_export_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("wanderwise").join("exports")
        } else {
            PathBuf::from("./wanderwise-exports")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("wanderwise")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("wanderwise").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config(paths: &[PathBuf]) -> Result<FileConfig> {
        for path in paths {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "loading config");
            let s =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[sections]` into `labels`.
    /// Omits aliases that collide with a section name (eg. "food"). Pairs
    /// are applied in alias order so the result does not depend on map order.
    fn load_sections(labels: &mut SectionLabels, sections: &Option<HashMap<String, String>>) {
        match sections {
            Some(map) if !map.is_empty() => {
                let mut pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Section::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();
                pairs.sort();

                if !pairs.is_empty() {
                    labels.extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::itinerary::parse_itinerary;
    use crate::tests::common::mk_config;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("wanderwise")
                .join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert!(c.iter().all(|p| p.ends_with("wanderwise/config.toml")));
        }
    }

    #[test]
    fn parse_file_accepts_export_dir_and_editor() {
        let toml = r#"
            export_dir = "/tmp/trips"
            editor = "hx"
            summary_min_chars = 25
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.export_dir.as_deref(), Some(Path::new("/tmp/trips")));
        assert_eq!(fc.editor.as_deref(), Some("hx"));
        assert_eq!(fc.summary_min_chars, Some(25));
    }

    #[test]
    fn parse_file_rejects_malformed_toml() {
        assert!(super::Config::parse_file("export_dir = ").is_err());
        assert!(super::Config::parse_file("summary_min_chars = \"ten\"").is_err());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_file_config(super::Config::parse_file("").unwrap());
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.summary_min_chars, DEFAULT_SUMMARY_MIN_CHARS);
        assert!(config.editor.is_none());
        assert!(config.export_dir.ends_with("exports"));
    }

    #[test]
    fn sections_table_extends_labels() {
        let toml = r#"
            [sections]
            "Where to Eat" = "food"
            "Good to Know" = "Travel Notes"
        "#;
        let config = Config::from_file_config(super::Config::parse_file(toml).unwrap());
        let labels = &config.section_labels;
        assert_eq!(labels.resolve("where to eat"), Some(Section::Food));
        assert_eq!(labels.resolve("Good to Know"), Some(Section::Notes));

        let raw = "Day 1 - Galle\nWhere to Eat\n- Hoppers\nGood to Know\nCarry cash";
        let days = parse_itinerary(raw, Some(config.parse_options()));
        assert_eq!(days[0].food, ["Hoppers"]);
        assert_eq!(days[0].notes, ["Carry cash"]);
    }

    #[test]
    fn sections_table_ignores_canonical_aliases() {
        let toml = r#"
            [sections]
            food = "budget"
            Snacks = "nowhere"
        "#;
        let config = Config::from_file_config(super::Config::parse_file(toml).unwrap());
        assert_eq!(config.section_labels.resolve("food"), Some(Section::Food));
        assert_eq!(config.section_labels.resolve("snacks"), None);
    }

    #[test]
    fn first_existing_file_is_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");
        let present = tmp.path().join("config.toml");
        fs::write(&present, "editor = \"nano\"\nsummary_min_chars = 4\n").unwrap();

        let config = Config::load_from(&[missing, present]);
        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.summary_min_chars, 4);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "editor = \"hx\"\nsummary_min_chars = [").unwrap();

        let err = super::Config::read_file_config(&[path.clone()]).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));

        let config = Config::load_from(&[path]);
        assert!(config.editor.is_none());
        assert_eq!(config.summary_min_chars, DEFAULT_SUMMARY_MIN_CHARS);
    }

    #[test]
    fn no_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&[tmp.path().join("nope.toml")]);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn parse_options_carry_config_values() {
        let mut config = mk_config(PathBuf::from("/tmp/trips"));
        config.summary_min_chars = 3;
        let options = config.parse_options();
        assert_eq!(options.summary_min_chars, Some(3));
        assert!(options.labels.is_some());
    }
}
