#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Settings for the world map generator.
//!
//! Operational parameters live in a `settings.toml` file next to the
//! generated output. Only `app_path` and `gdoc_id` are required; every
//! other key falls back to the project defaults below.
//!
//! ```toml
//! app_path = "http://www.indiana.edu/~kdglobal/worldmap-dev/"
//! gdoc_id = "17EabushNWBxGeNpWNBAJp2E97eZt08k7Z5m-G7eqQmk"
//! style_refresh = true
//! icon_size = [30, 50]
//! icon_anchor = [15, 0]
//! init_center = [20.0, -35.0]
//! init_zoom = 2
//! max_zoom = 6
//! min_zoom = 2
//!
//! [paths]
//! images = "../images"
//!
//! [[themes]]
//! name = "Commerce"
//! subcategories = ["Consulates", "Trade Posts"]
//! ```

pub mod paths;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use paths::{PathSettings, WorkPaths};

/// Default spreadsheet export endpoint. `{gdoc_id}` is substituted.
pub const DEFAULT_EXPORT_URL: &str =
    "https://docs.google.com/feeds/download/spreadsheets/Export?key={gdoc_id}&exportFormat=csv&gid=0";

/// File name looked up in the working directory when no path is given.
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or is missing required keys.
    #[error("Settings parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings parsed but contain inconsistent values.
    #[error("Invalid settings: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Fixed operational parameters for one generator run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Public base URL of the map application, prefixed to asset URLs.
    pub app_path: String,
    /// Spreadsheet document identifier.
    pub gdoc_id: String,
    /// Export URL template containing `{gdoc_id}`.
    #[serde(default = "default_export_url")]
    pub export_url: String,
    /// Whether `style.js` is regenerated.
    #[serde(default = "default_style_refresh")]
    pub style_refresh: bool,
    /// Icon width and height in pixels.
    #[serde(default = "default_icon_size")]
    pub icon_size: [u32; 2],
    /// Icon pixel that sits on the marker's location.
    #[serde(default = "default_icon_anchor")]
    pub icon_anchor: [i32; 2],
    /// Initial map center as `[lat, lon]`.
    #[serde(default = "default_init_center")]
    pub init_center: [f64; 2],
    #[serde(default = "default_init_zoom")]
    pub init_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,
    /// South-west and north-east corners the map may not be panned past.
    #[serde(default = "default_max_bounds")]
    pub max_bounds: [[f64; 2]; 2],
    #[serde(default)]
    pub paths: PathSettings,
    /// Thematic grouping of subcategories in the overlay selector.
    #[serde(default)]
    pub themes: Vec<ThemeDefinition>,
}

/// A named group of subcategories shown together in the overlay selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub subcategories: Vec<String>,
}

fn default_export_url() -> String {
    DEFAULT_EXPORT_URL.to_string()
}

const fn default_style_refresh() -> bool {
    true
}

const fn default_icon_size() -> [u32; 2] {
    [30, 50]
}

const fn default_icon_anchor() -> [i32; 2] {
    [15, 0]
}

const fn default_init_center() -> [f64; 2] {
    [20.0, -35.0]
}

const fn default_init_zoom() -> u8 {
    2
}

const fn default_max_zoom() -> u8 {
    6
}

const fn default_min_zoom() -> u8 {
    2
}

const fn default_max_bounds() -> [[f64; 2]; 2] {
    [[-68.138_85, -178.593_85], [79.687_18, 189.140_63]]
}

impl Settings {
    /// Reads and validates the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = parse_settings_toml(&text)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Export URL with the document identifier substituted.
    #[must_use]
    pub fn source_url(&self) -> String {
        self.export_url.replace("{gdoc_id}", &self.gdoc_id)
    }

    /// Index and name of the first theme listing `subcategory`.
    #[must_use]
    pub fn theme_for(&self, subcategory: &str) -> Option<(usize, &str)> {
        self.themes
            .iter()
            .enumerate()
            .find(|(_, theme)| theme.subcategories.iter().any(|s| s == subcategory))
            .map(|(i, theme)| (i, theme.name.as_str()))
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.gdoc_id.trim().is_empty() {
            return Err(SettingsError::Invalid {
                message: "gdoc_id must not be empty".to_string(),
            });
        }
        if self.min_zoom > self.max_zoom {
            return Err(SettingsError::Invalid {
                message: format!(
                    "min_zoom ({}) is greater than max_zoom ({})",
                    self.min_zoom, self.max_zoom
                ),
            });
        }
        if !self.export_url.contains("{gdoc_id}") {
            log::warn!("export_url has no {{gdoc_id}} placeholder; gdoc_id will be ignored");
        }
        Ok(())
    }
}

/// Parses and validates settings from a TOML string.
///
/// # Errors
///
/// Returns [`SettingsError`] if the TOML is malformed, a required key is
/// missing, or the values are inconsistent.
pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let settings: Settings = toml::from_str(toml_str)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
app_path = "http://example.org/worldmap/"
gdoc_id = "abc123"
"#;

    #[test]
    fn minimal_settings_use_defaults() {
        let settings = parse_settings_toml(MINIMAL).unwrap();
        assert_eq!(settings.app_path, "http://example.org/worldmap/");
        assert!(settings.style_refresh);
        assert_eq!(settings.icon_size, [30, 50]);
        assert_eq!(settings.icon_anchor, [15, 0]);
        assert_eq!(settings.init_zoom, 2);
        assert_eq!(settings.min_zoom, 2);
        assert_eq!(settings.max_zoom, 6);
        assert_eq!(settings.paths, PathSettings::default());
        assert!(settings.themes.is_empty());
    }

    #[test]
    fn substitutes_document_id_into_export_url() {
        let settings = parse_settings_toml(MINIMAL).unwrap();
        assert_eq!(
            settings.source_url(),
            "https://docs.google.com/feeds/download/spreadsheets/Export?key=abc123&exportFormat=csv&gid=0"
        );
    }

    #[test]
    fn parses_full_settings() {
        let toml_str = r#"
app_path = "/"
gdoc_id = "doc"
export_url = "http://localhost/{gdoc_id}.csv"
style_refresh = false
icon_size = [20, 40]
icon_anchor = [10, -5]
init_center = [40.5, -70.25]
init_zoom = 3
min_zoom = 1
max_zoom = 8
max_bounds = [[-10.0, -20.0], [10.0, 20.0]]

[paths]
staging = "in.csv"
images = "img"

[[themes]]
name = "Commerce"
subcategories = ["Consulates", "Ports"]

[[themes]]
name = "Conflict"
subcategories = ["Forts"]
"#;
        let settings = parse_settings_toml(toml_str).unwrap();
        assert_eq!(settings.source_url(), "http://localhost/doc.csv");
        assert!(!settings.style_refresh);
        assert_eq!(settings.icon_anchor, [10, -5]);
        assert_eq!(settings.max_bounds, [[-10.0, -20.0], [10.0, 20.0]]);
        assert_eq!(settings.paths.staging, PathBuf::from("in.csv"));
        assert_eq!(settings.paths.output, PathBuf::from("data.js"));
        assert_eq!(settings.theme_for("Ports"), Some((0, "Commerce")));
        assert_eq!(settings.theme_for("Forts"), Some((1, "Conflict")));
        assert_eq!(settings.theme_for("Missions"), None);
    }

    #[test]
    fn missing_document_id_is_rejected() {
        let err = parse_settings_toml("app_path = \"/\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn empty_document_id_is_rejected() {
        let err = parse_settings_toml("app_path = \"/\"\ngdoc_id = \" \"").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[test]
    fn inverted_zoom_bounds_are_rejected() {
        let toml_str = format!("{MINIMAL}min_zoom = 7\nmax_zoom = 3\n");
        let err = parse_settings_toml(&toml_str).unwrap_err();
        assert!(err.to_string().contains("min_zoom"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Settings::load(&dir.path().join(SETTINGS_FILENAME)).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, MINIMAL).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.gdoc_id, "abc123");
    }
}
