//! Rotation of the previously generated data script.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use worldmap_settings::paths::ensure_dir;

/// Sortable timestamp format used in backup names and the script header.
pub const STAMP_FORMAT: &str = "%Y-%m-%d@%H:%M:%S";

/// Formats `now` as a rotation timestamp (`YYYY-MM-DD@HH:MM:SS`).
#[must_use]
pub fn stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(STAMP_FORMAT).to_string()
}

/// Backup location for `output`: `<backups>/<stem>_<stamp>.<ext>`.
#[must_use]
pub fn backup_path(output: &Path, backups: &Path, stamp: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "data".into(), |s| s.to_string_lossy());
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{stamp}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{stamp}"),
    };
    backups.join(name)
}

/// Moves an existing `output` into `backups`, creating the directory first
/// if needed. Returns the backup path, or `None` when there was nothing to
/// rotate.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the file
/// cannot be moved.
pub fn rotate(output: &Path, backups: &Path, stamp: &str) -> std::io::Result<Option<PathBuf>> {
    if !backups.is_dir() {
        log::info!("Backups dir missing.");
    }
    if ensure_dir(backups)? {
        log::info!("Created {}", backups.display());
    }

    if !output.exists() {
        log::debug!("No previous {} to back up", output.display());
        return Ok(None);
    }

    let target = backup_path(output, backups, stamp);
    std::fs::rename(output, &target)?;
    log::info!("Moved {} to {}", output.display(), target.display());

    Ok(Some(target))
}
