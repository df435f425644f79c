use crate::Cli;
use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::Path,
    process::Command,
};
use wanderwise_core::Config;

/// Reads the itinerary text from the given file, from piped stdin, or from
/// an editor buffer when stdin is a terminal.
pub fn read_input(cli: &Cli, config: &Config) -> Result<String> {
    match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None if io::stdin().is_terminal() => {
            let editor = resolve_editor(&config.editor);
            create_editor_buffer(&editor)
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("wanderwise")
        .suffix(".md")
        .tempfile()
        .context("creating editor buffer")?;

    let path = file.path().to_path_buf();
    let status = Command::new(editor_cmd)
        .arg(&path)
        .status()
        .with_context(|| format!("starting editor `{editor_cmd}`"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(fs::read_to_string(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_editor_wins() {
        assert_eq!(resolve_editor(&Some("hx".to_string())), "hx");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_an_error() {
        assert!(create_editor_buffer("false").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn editor_output_is_read_back() {
        // `true` leaves the buffer untouched.
        assert_eq!(create_editor_buffer("true").unwrap(), "");
    }
}
