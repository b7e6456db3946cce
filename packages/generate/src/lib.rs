#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generation of the Leaflet data script and its style companion.
//!
//! One [`run`] rotates the previous `data.js` into the backups directory,
//! refreshes the staged spreadsheet, classifies its rows and writes a new
//! `data.js`. When `style_refresh` is enabled it also rewrites `style.js`
//! from the subcategories found and the icon images available.
//!
//! The script is built as a [`document::MapDocument`] first and rendered
//! afterwards, so its structure can be inspected without parsing text.

pub mod backup;
pub mod document;
pub mod naming;
pub mod popup;
pub mod script;
pub mod style;

#[cfg(test)]
mod test_helpers;

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use worldmap_records::RecordsError;
use worldmap_settings::Settings;
use worldmap_source::{SourceError, SpreadsheetSource};

use crate::document::MapDocument;
use crate::style::StyleSheet;

/// Errors that can abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Rotation or output write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet could not be fetched or staged.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The staged spreadsheet could not be read.
    #[error(transparent)]
    Records(#[from] RecordsError),

    /// The icon image directory could not be listed.
    #[error("Failed to list icon images in {path}: {source}")]
    ImageDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run switches that are not part of the settings file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Reuse the existing staging file instead of downloading.
    pub skip_fetch: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stamp: String,
    /// Where the previous data script was moved, if there was one.
    pub backup: Option<PathBuf>,
    pub output: PathBuf,
    /// Set only when the style script was rewritten.
    pub style: Option<PathBuf>,
    pub maps: usize,
    pub markers: usize,
    pub shapes: usize,
    pub dropped: u64,
}

/// Runs one full generation pass rooted at `root`.
///
/// Steps, each aborting the run on failure: rotate the old output, stage
/// the spreadsheet (unless `options.skip_fetch`), classify, write the data
/// script, and optionally write the style script.
///
/// # Errors
///
/// Returns [`GenerateError`] if any filesystem operation, the fetch, or
/// reading the staged spreadsheet fails.
pub async fn run<Tz: TimeZone>(
    settings: &Settings,
    root: &Path,
    source: &(impl SpreadsheetSource + ?Sized),
    options: RunOptions,
    now: &DateTime<Tz>,
) -> Result<RunReport, GenerateError>
where
    Tz::Offset: std::fmt::Display,
{
    let paths = settings.paths.resolve(root);
    let stamp = backup::stamp(now);

    let backup = backup::rotate(&paths.output, &paths.backups, &stamp)?;

    if options.skip_fetch {
        log::info!("Skipping fetch, reusing {}", paths.staging.display());
    } else {
        worldmap_source::stage(source, &paths.staging).await?;
    }

    let classified = worldmap_records::classify::classify_path(&paths.staging)?;

    let document = MapDocument::build(&classified, settings, &stamp);
    std::fs::write(&paths.output, document.to_string())?;
    log::info!("Wrote {}", paths.output.display());

    let style = if settings.style_refresh {
        let images =
            style::image_stems(&paths.images).map_err(|source| GenerateError::ImageDir {
                path: paths.images.clone(),
                source,
            })?;
        let sheet = StyleSheet::build(
            document.subcategories.iter().map(|s| s.name.as_str()),
            &images,
            settings,
        );
        std::fs::write(&paths.style, sheet.to_string())?;
        log::info!("Wrote {}", paths.style.display());
        Some(paths.style)
    } else {
        log::debug!("Style refresh disabled, leaving {}", paths.style.display());
        None
    };

    Ok(RunReport {
        stamp,
        backup,
        output: paths.output,
        style,
        maps: classified.maps.len(),
        markers: classified.markers.len(),
        shapes: classified.shapes.len(),
        dropped: classified.dropped,
    })
}
