use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use wanderwise_core::{Config, parse_itinerary};

pub fn view_mode(
    cli: &Cli,
    renderer: &Renderer,
    config: &Config,
    text: &str,
) -> Result<CliModeResult> {
    let days = parse_itinerary(text, Some(config.parse_options()));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(CliModeResult::Finish);
    }

    if days.is_empty() {
        renderer.print_info("No days found");
    } else {
        renderer.print_info(&days_found(days.len()));
        renderer.print_days(&days);
    }
    Ok(CliModeResult::Finish)
}

fn days_found(count: usize) -> String {
    if count == 1 {
        "1 day found.".to_string()
    } else {
        format!("{count} days found.")
    }
}
