#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spreadsheet export download and staging.
//!
//! A [`SpreadsheetSource`] yields the raw CSV payload;
//! [`stage`] persists it verbatim to the local staging file. The HTTP
//! implementation is [`csv_export::CsvExportFetcher`].
//!
//! There is no retry and no timeout: a failed download aborts the run.

pub mod csv_export;

use std::path::Path;

/// Errors that can occur while fetching or staging the spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (staging file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can produce the full tabular payload in one piece.
pub trait SpreadsheetSource: Send + Sync {
    /// Retrieves the complete CSV payload.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the payload cannot be retrieved.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Vec<u8>, SourceError>> + Send;

    /// Human-readable location of the payload, for log messages.
    fn location(&self) -> &str;
}

/// Fetches the payload from `source` and writes it to `staging`,
/// overwriting previous content. Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`SourceError`] if the fetch or the write fails. On a failed
/// fetch the staging file is left untouched.
pub async fn stage(
    source: &(impl SpreadsheetSource + ?Sized),
    staging: &Path,
) -> Result<u64, SourceError> {
    log::info!("Fetching spreadsheet from {}", source.location());
    let payload = source.fetch().await?;
    write_staging(staging, &payload)?;
    log::info!(
        "Staged {} bytes at {}",
        payload.len(),
        staging.display()
    );
    Ok(payload.len() as u64)
}

/// Writes `payload` to `staging`, truncating any previous content.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_staging(staging: &Path, payload: &[u8]) -> std::io::Result<()> {
    std::fs::write(staging, payload)
}
