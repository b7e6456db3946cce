//! Canonical file paths for a generator run.
//!
//! Relative paths in [`PathSettings`] are resolved against the working
//! directory the generator was started in.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File locations as written in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Local copy of the fetched spreadsheet.
    pub staging: PathBuf,
    /// Generated data script.
    pub output: PathBuf,
    /// Generated style script.
    pub style: PathBuf,
    /// Directory receiving rotated copies of `output`.
    pub backups: PathBuf,
    /// Directory searched for per-subcategory icon images.
    pub images: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            staging: PathBuf::from("data.csv"),
            output: PathBuf::from("data.js"),
            style: PathBuf::from("style.js"),
            backups: PathBuf::from("backups"),
            images: PathBuf::from("../images"),
        }
    }
}

impl PathSettings {
    /// Resolves every path against `root`.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> WorkPaths {
        WorkPaths {
            staging: root.join(&self.staging),
            output: root.join(&self.output),
            style: root.join(&self.style),
            backups: root.join(&self.backups),
            images: root.join(&self.images),
        }
    }
}

/// Absolute (or root-relative) paths used during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    pub staging: PathBuf,
    pub output: PathBuf,
    pub style: PathBuf,
    pub backups: PathBuf,
    pub images: PathBuf,
}

/// Ensures a directory exists, creating it if necessary.
///
/// Returns `true` if the directory had to be created.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    Ok(true)
}
