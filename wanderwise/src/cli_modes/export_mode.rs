use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tracing::info;
use wanderwise_core::{
    Config,
    export::{ExportRequest, export_file_name, render_itinerary_html},
};

const DEFAULT_NAME: &str = "My Itinerary";

pub fn export_mode(
    cli: &Cli,
    renderer: &Renderer,
    config: &Config,
    text: &str,
) -> Result<CliModeResult> {
    let Some(target) = &cli.export else {
        return Ok(CliModeResult::NothingToDo);
    };

    let name = cli.name.as_deref().unwrap_or(DEFAULT_NAME);
    let request = ExportRequest {
        destinations: cli.destinations.clone(),
        user_name: cli.user.clone(),
        ..ExportRequest::new(name, text)
    };
    let html = render_itinerary_html(&request, &config.date_format);

    let path = export_path(target.as_ref(), config, name);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "exported itinerary");

    renderer.print_info(&format!("Exported itinerary to {}", path.display()));
    Ok(CliModeResult::Finish)
}

/// An explicit path is used as is; otherwise the file goes to the export
/// directory, named after the itinerary.
fn export_path(target: Option<&PathBuf>, config: &Config, name: &str) -> PathBuf {
    match target {
        Some(path) => path.clone(),
        None => config.export_dir.join(export_file_name(name)),
    }
}
