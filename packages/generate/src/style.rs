//! Marker icon and shape style declarations (`style.js`).

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use worldmap_settings::Settings;

use crate::naming;

/// Fallback icon for subcategories without their own image.
pub const DEFAULT_ICON: &str = "default-icon.png";

/// Per-subcategory icon and shape style declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub entries: Vec<StyleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub subcategory: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// The normalized subcategory name plus `.png` exists in the image
    /// directory.
    Custom {
        url: String,
        size: [u32; 2],
        anchor: [i32; 2],
    },
    Default { url: String },
}

/// Stems of the `.png` files in `dir`.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read.
pub fn image_stems(dir: &Path) -> std::io::Result<BTreeSet<String>> {
    let mut stems = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "png")
            && let Some(stem) = path.file_stem()
        {
            stems.insert(stem.to_string_lossy().into_owned());
        }
    }
    log::debug!("Found {} icon images in {}", stems.len(), dir.display());
    Ok(stems)
}

impl StyleSheet {
    #[must_use]
    pub fn build<'a>(
        subcategories: impl IntoIterator<Item = &'a str>,
        images: &BTreeSet<String>,
        settings: &Settings,
    ) -> Self {
        let images_url = format!("{}images/", settings.app_path);
        let entries = subcategories
            .into_iter()
            .map(|subcategory| {
                let stem = naming::key_fragment(subcategory);
                let icon = if images.contains(&stem) {
                    Icon::Custom {
                        url: format!("{images_url}{stem}.png"),
                        size: settings.icon_size,
                        anchor: settings.icon_anchor,
                    }
                } else {
                    log::debug!("No icon image for {subcategory}, using {DEFAULT_ICON}");
                    Icon::Default {
                        url: format!("{images_url}{DEFAULT_ICON}"),
                    }
                };
                StyleEntry {
                    subcategory: subcategory.to_string(),
                    icon,
                }
            })
            .collect();

        Self { entries }
    }
}

impl Display for StyleSheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "// {} marker icon and shape styling", entry.subcategory)?;
            writeln!(f, "var {} = L.icon({{", naming::icon_var(&entry.subcategory))?;
            match &entry.icon {
                Icon::Custom { url, size, anchor } => {
                    writeln!(f, "\ticonUrl: '{url}',")?;
                    writeln!(
                        f,
                        "\ticonSize: [{}, {}], // icon height/width in pixels",
                        size[0], size[1]
                    )?;
                    writeln!(
                        f,
                        "\ticonAnchor: [{}, {}], // point where icon corresponds to marker's location",
                        anchor[0], anchor[1]
                    )?;
                }
                Icon::Default { url } => {
                    writeln!(f, "\ticonUrl: '{url}',")?;
                    writeln!(f, "\t//iconSize: [0, 0], // icon height/width in pixels")?;
                    writeln!(
                        f,
                        "\t//iconAnchor: [0, 0], // point of the icon which will correspond to marker's location"
                    )?;
                }
            }
            writeln!(
                f,
                "\t//popupAnchor: [0, 0] // point from which the popup should open relative to the iconAnchor"
            )?;
            writeln!(f, "}});")?;
            writeln!(f)?;
            writeln!(f, "var {} = {{", naming::shape_style_var(&entry.subcategory))?;
            writeln!(f, "\t'color': '#0000ff',")?;
            writeln!(f, "\t'weight': 1,")?;
            writeln!(f, "\t'opacity': 1")?;
            writeln!(f, "}};")?;
            writeln!(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
