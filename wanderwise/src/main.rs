mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli_modes::{CliModeResult, check_mode, export_mode, read_input, use_color, view_mode};
use render::{ColorMode, RenderOptions, Renderer};
use std::path::PathBuf;
use std::process::ExitCode;
use wanderwise_core::Config;

/// wanderwise — Turn generated travel itineraries into structured days
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Prints the default export directory
    #[arg(long, short, exclusive = true)]
    path: bool,
    /// Itinerary text to read. Use `-` or omit it to read stdin.
    /// When stdin is a terminal, opens your $EDITOR instead.
    file: Option<PathBuf>,
    /// Prints parsed days (or the `--check` report) as JSON.
    #[arg(long, short, conflicts_with = "export")]
    json: bool,
    /// Cleans the text and reports missing sections and detected days.
    #[arg(long, short, conflicts_with = "export")]
    check: bool,
    /// Writes an HTML export to the export directory, or to PATH with `--export=PATH`.
    /// A bare word after `--export` is read as the input file.
    #[arg(long, short, num_args = 0..=1, require_equals = true, value_name = "PATH")]
    export: Option<Option<PathBuf>>,
    /// Title of the exported itinerary.
    #[arg(long, short, requires = "export")]
    name: Option<String>,
    /// Comma separated destinations shown under the export title (e.g. `--destinations Kandy,Ella`).
    #[arg(long, value_delimiter = ',', requires = "export")]
    destinations: Vec<String>,
    /// Name shown as the export's owner.
    #[arg(long, requires = "export")]
    user: Option<String>,
    /// Only shows day titles, or the review without the cleaned text.
    #[arg(long, short)]
    short: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wanderwise: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log level comes from `WANDERWISE_LOG` (e.g. `debug`); warnings only by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("WANDERWISE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let renderer = Renderer::new(Some(RenderOptions {
        use_color: use_color(&cli),
        short_mode: cli.short,
    }));

    if cli.path {
        println!("{}", config.export_dir.display());
        return Ok(());
    }

    let text = read_input(&cli, &config)?;
    if text.trim().is_empty() {
        renderer.print_info("Nothing to parse, because no text was received.");
        return Ok(());
    }

    if let CliModeResult::Finish = check_mode(&cli, &renderer, &text)? {
        return Ok(());
    };

    if let CliModeResult::Finish = export_mode(&cli, &renderer, &config, &text)? {
        return Ok(());
    };

    view_mode(&cli, &renderer, &config, &text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_path_is_optional() {
        let cli = Cli::try_parse_from(["wanderwise", "trip.txt", "--export"]).unwrap();
        assert_eq!(cli.export, Some(None));
        assert_eq!(cli.file, Some(PathBuf::from("trip.txt")));

        let cli = Cli::try_parse_from(["wanderwise", "--export=out.html", "trip.txt"]).unwrap();
        assert_eq!(cli.export, Some(Some(PathBuf::from("out.html"))));
    }

    #[test]
    fn word_after_export_is_the_input_file() {
        let cli = Cli::try_parse_from(["wanderwise", "--export", "trip.txt"]).unwrap();
        assert_eq!(cli.export, Some(None));
        assert_eq!(cli.file, Some(PathBuf::from("trip.txt")));
    }

    #[test]
    fn destinations_split_on_commas() {
        let cli = Cli::try_parse_from([
            "wanderwise",
            "--export=out.html",
            "--destinations",
            "Kandy,Ella",
        ])
        .unwrap();
        assert_eq!(cli.destinations, ["Kandy", "Ella"]);
    }

    #[test]
    fn json_conflicts_with_export() {
        assert!(Cli::try_parse_from(["wanderwise", "--json", "--export"]).is_err());
        assert!(Cli::try_parse_from(["wanderwise", "--check", "--json"]).is_ok());
    }
}
