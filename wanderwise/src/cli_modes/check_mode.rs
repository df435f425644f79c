use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use tracing::debug;
use wanderwise_core::review;

pub fn check_mode(cli: &Cli, renderer: &Renderer, text: &str) -> Result<CliModeResult> {
    if !cli.check {
        return Ok(CliModeResult::NothingToDo);
    }

    let report = review(text);
    debug!(
        valid = report.valid,
        days = report.days_detected,
        "reviewed itinerary"
    );
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        renderer.print_review(&report);
    }
    Ok(CliModeResult::Finish)
}
