#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the world map data generator.
//!
//! With no arguments, reads `settings.toml` from the current directory,
//! downloads the spreadsheet and regenerates `data.js` (and `style.js`
//! when enabled) next to it.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use worldmap_generate::RunOptions;
use worldmap_settings::{SETTINGS_FILENAME, Settings};
use worldmap_source::csv_export::CsvExportFetcher;

#[derive(Parser)]
#[command(name = "worldmap", about = "Leaflet data generator for the world map")]
struct Cli {
    /// Working directory holding the settings file and generated scripts
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Settings file (defaults to `settings.toml` inside `--dir`)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Reuse the existing staging file instead of downloading
    #[arg(long)]
    skip_fetch: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .try_init()?;

    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .unwrap_or_else(|| cli.dir.join(SETTINGS_FILENAME));
    let settings = Settings::load(&settings_path)?;

    let fetcher = CsvExportFetcher::new(&settings.source_url());
    let options = RunOptions {
        skip_fetch: cli.skip_fetch,
    };

    let report =
        worldmap_generate::run(&settings, &cli.dir, &fetcher, options, &chrono::Local::now())
            .await?;

    log::info!(
        "{} maps, {} markers, {} shapes written ({} rows dropped)",
        report.maps,
        report.markers,
        report.shapes,
        report.dropped,
    );

    println!();
    match &report.backup {
        Some(backup) => println!(
            "{} New {} created, old one has been moved to: {}",
            style("Done!").green().bold(),
            report.output.display(),
            style(backup.display()).red(),
        ),
        None => println!(
            "{} New {} created, there was no previous file to back up.",
            style("Done!").green().bold(),
            report.output.display(),
        ),
    }
    if let Some(style_path) = &report.style {
        println!("Styles refreshed in {}", style_path.display());
    }

    Ok(())
}
