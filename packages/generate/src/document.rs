//! Structured model of the generated data script.
//!
//! [`MapDocument::build`] turns classified records into named declarations
//! and groupings; [`crate::script`] renders them. Every variable name the
//! script will contain is decided here.

use worldmap_records::Classified;
use worldmap_records::temporal::TemporalGroups;
use worldmap_records_models::{RecordDetails, RecordId, Temporal, TemporalKind};
use worldmap_settings::Settings;

use crate::{naming, popup};

/// Everything the data script declares, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// Rotation timestamp stamped into the header comment.
    pub stamp: String,
    pub basemaps: Vec<Basemap>,
    /// Markers followed by shapes, each in collection order.
    pub overlays: Vec<Overlay>,
    pub temporal_layers: Vec<TemporalLayer>,
    pub subcategories: Vec<SubcategoryLayer>,
    pub categories: Vec<CategoryLayer>,
    pub themes: Vec<Theme>,
    pub viewport: Viewport,
}

/// A tile layer and the years it is the active base map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basemap {
    pub id: RecordId,
    pub title: String,
    pub url: String,
    pub start_year: String,
    pub end_year: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

/// A marker or shape with its popup and visibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub id: RecordId,
    pub geometry: Geometry,
    /// Subcategory name, used for icon and shape style lookup.
    pub subcategory: String,
    pub temporal: Temporal,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    /// A marker at raw `[lat, lon]` text.
    Point { latitude: String, longitude: String },
    /// Embedded `GeoJSON`, declared as `json<N>` ahead of the shape.
    GeoJson { var: String, text: String },
}

/// A `start<Y>Layer`, `iso<Y>Layer` or `range<S>_<E>Layer` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalLayer {
    pub var: String,
    pub members: Vec<RecordId>,
}

/// Declarations for one subcategory: cluster group, member list, layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryLayer {
    pub name: String,
    pub cluster_var: String,
    pub members_var: String,
    pub layer_var: String,
    pub css_class: String,
    pub members: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLayer {
    pub name: String,
    pub layer_var: String,
    pub members: Vec<RecordId>,
}

/// A top-level group of the overlay selector, toggled by `#theme-<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub index: usize,
    pub name: String,
    /// `(subcategory label, cluster variable)` pairs.
    pub entries: Vec<(String, String)>,
}

impl Theme {
    #[must_use]
    pub fn layers_var(&self) -> String {
        format!("theme{}Layers", self.index)
    }

    /// DOM id of the checkbox controlling this theme.
    #[must_use]
    pub fn control_id(&self) -> String {
        format!("theme-{}", self.index)
    }
}

/// Initial view and pan limits of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: [f64; 2],
    pub zoom: u8,
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl MapDocument {
    /// Builds the document for one run.
    #[must_use]
    pub fn build(classified: &Classified, settings: &Settings, stamp: &str) -> Self {
        let basemaps = classified
            .maps
            .iter()
            .enumerate()
            .map(|(i, map)| Basemap {
                id: RecordId::Map(i),
                title: map.title.clone(),
                url: map.url.clone(),
                start_year: map.start_year.clone(),
                end_year: map.end_year.clone(),
                min_zoom: settings.min_zoom,
                max_zoom: settings.max_zoom,
            })
            .collect();

        let markers = classified.markers.iter().enumerate().map(|(i, marker)| {
            overlay(
                RecordId::Marker(i),
                Geometry::Point {
                    latitude: marker.position.latitude.clone(),
                    longitude: marker.position.longitude.clone(),
                },
                &marker.details,
            )
        });
        let shapes = classified.shapes.iter().enumerate().map(|(i, shape)| {
            overlay(
                RecordId::Shape(i),
                Geometry::GeoJson {
                    var: format!("json{i}"),
                    text: shape.geojson_text.clone(),
                },
                &shape.details,
            )
        });
        let overlays = markers.chain(shapes).collect();

        let subcategory_groups = classified.categories.subcategories();

        let subcategories = subcategory_groups
            .iter()
            .map(|group| SubcategoryLayer {
                name: group.name.to_string(),
                cluster_var: naming::cluster_var(group.name),
                members_var: naming::members_var(group.name),
                layer_var: naming::subcategory_layer_var(group.name),
                css_class: naming::css_class(group.name),
                members: group.members.clone(),
            })
            .collect();

        let categories = classified
            .categories
            .categories()
            .map(|(name, _)| CategoryLayer {
                name: name.to_string(),
                layer_var: naming::category_layer_var(name),
                members: classified.categories.category_members(name),
            })
            .collect();

        let mut themes: Vec<Theme> = Vec::new();
        let mut assigned: Vec<(usize, &str, &str)> = Vec::new();
        for group in &subcategory_groups {
            // Configured themes sort ahead of category fallbacks.
            let (rank, theme_name) = settings
                .theme_for(group.name)
                .unwrap_or_else(|| {
                    let category = group.categories.first().copied().unwrap_or(group.name);
                    (settings.themes.len(), category)
                });
            assigned.push((rank, theme_name, group.name));
        }
        assigned.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        for (_, theme_name, subcategory) in assigned {
            let entry = (subcategory.to_string(), naming::cluster_var(subcategory));
            if let Some(theme) = themes.iter_mut().find(|t| t.name == theme_name) {
                theme.entries.push(entry);
            } else {
                themes.push(Theme {
                    index: themes.len(),
                    name: theme_name.to_string(),
                    entries: vec![entry],
                });
            }
        }

        Self {
            stamp: stamp.to_string(),
            basemaps,
            overlays,
            temporal_layers: temporal_layers(&TemporalGroups::build(
                &classified.markers,
                &classified.shapes,
            )),
            subcategories,
            categories,
            themes,
            viewport: Viewport {
                center: settings.init_center,
                zoom: settings.init_zoom,
                south_west: settings.max_bounds[0],
                north_east: settings.max_bounds[1],
            },
        }
    }
}

fn overlay(id: RecordId, geometry: Geometry, details: &RecordDetails) -> Overlay {
    Overlay {
        id,
        geometry,
        subcategory: details.subcategory.clone(),
        temporal: details.temporal(),
        popup: popup::compose(details),
    }
}

/// One layer per temporal group. Keys that reduce to the same variable
/// name share a layer.
fn temporal_layers(groups: &TemporalGroups) -> Vec<TemporalLayer> {
    let mut layers: Vec<TemporalLayer> = Vec::new();
    for kind in [TemporalKind::Start, TemporalKind::Iso, TemporalKind::Range] {
        for (key, ids) in groups.kind(kind) {
            let var = format!("{kind}{}Layer", naming::key_fragment(key));
            if let Some(layer) = layers.iter_mut().find(|l| l.var == var) {
                log::warn!("{kind} group {key:?} collapses into {var}, merging members");
                layer.members.extend_from_slice(ids);
                layer.members.sort_unstable();
            } else {
                layers.push(TemporalLayer {
                    var,
                    members: ids.clone(),
                });
            }
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use worldmap_records::classify::classify_reader;

    use super::*;
    use crate::test_helpers::{HEADER, STAMP, classified, settings};

    fn document(extra: &str) -> MapDocument {
        MapDocument::build(&classified(), &settings(extra), STAMP)
    }

    #[test]
    fn basemaps_carry_zoom_bounds() {
        let doc = document("");
        assert_eq!(doc.basemaps.len(), 2);
        assert_eq!(doc.basemaps[0].id, RecordId::Map(0));
        assert_eq!(doc.basemaps[0].title, "1800");
        assert_eq!(doc.basemaps[0].min_zoom, 2);
        assert_eq!(doc.basemaps[0].max_zoom, 6);
    }

    #[test]
    fn overlays_list_markers_then_shapes() {
        let doc = document("");
        let ids: Vec<RecordId> = doc.overlays.iter().map(|o| o.id).collect();
        assert_eq!(
            ids,
            vec![
                RecordId::Marker(0),
                RecordId::Marker(1),
                RecordId::Marker(2),
                RecordId::Shape(0),
            ]
        );
        assert_eq!(doc.overlays[0].temporal.kind(), TemporalKind::Start);
        assert_eq!(doc.overlays[1].temporal.kind(), TemporalKind::Iso);
        assert_eq!(doc.overlays[2].temporal.kind(), TemporalKind::Range);
        assert_eq!(
            doc.overlays[3].geometry,
            Geometry::GeoJson {
                var: "json0".to_string(),
                text: r#"{"type":"Polygon"}"#.to_string(),
            }
        );
    }

    #[test]
    fn subcategory_and_category_layers() {
        let doc = document("");
        let forts = doc
            .subcategories
            .iter()
            .find(|s| s.name == "Forts")
            .unwrap();
        assert_eq!(forts.cluster_var, "FortsMarkers");
        assert_eq!(forts.css_class, "forts");
        assert_eq!(forts.members, vec![RecordId::Marker(0), RecordId::Marker(2)]);

        let military = doc
            .categories
            .iter()
            .find(|c| c.name == "Military")
            .unwrap();
        assert_eq!(military.layer_var, "MilitaryCategoryLayer");
        assert_eq!(military.members, forts.members);
    }

    #[test]
    fn themes_fall_back_to_category_names() {
        let doc = document("");
        let names: Vec<&str> = doc.themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Military", "Territory", "Trade"]);
        assert_eq!(doc.themes[0].index, 0);
        assert_eq!(doc.themes[0].control_id(), "theme-0");
        assert_eq!(
            doc.themes[2].entries,
            vec![("Consulates".to_string(), "ConsulatesMarkers".to_string())]
        );
    }

    #[test]
    fn configured_themes_come_first() {
        let doc = document(
            "[[themes]]\nname = \"Expansion\"\nsubcategories = [\"Claims\", \"Forts\"]\n",
        );
        let names: Vec<&str> = doc.themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Expansion", "Trade"]);
        assert_eq!(doc.themes[0].layers_var(), "theme0Layers");
        assert_eq!(doc.themes[0].entries.len(), 2);
    }

    #[test]
    fn viewport_follows_settings() {
        let doc = document("init_center = [40.0, -100.0]\ninit_zoom = 4\n");
        assert_eq!(doc.viewport.center, [40.0, -100.0]);
        assert_eq!(doc.viewport.zoom, 4);
        assert_eq!(doc.viewport.south_west, [-68.138_85, -178.593_85]);
    }

    #[test]
    fn temporal_layers_follow_kind_then_key() {
        let doc = document("");
        let vars: Vec<&str> = doc.temporal_layers.iter().map(|l| l.var.as_str()).collect();
        assert_eq!(
            vars,
            vec!["start1850Layer", "iso1850Layer", "range1818_1846Layer", "range1825_1860Layer"]
        );
    }

    #[test]
    fn colliding_temporal_keys_share_one_layer() {
        let input = format!(
            "{HEADER}\
Marker,,Fort A,1850,,,,1,2,Military,Forts,,,,,,
Marker,,Fort B,1850?,,,,3,4,Military,Forts,,,,,,
"
        );
        let classified = classify_reader(input.as_bytes()).unwrap();

        let doc = MapDocument::build(&classified, &settings(""), STAMP);

        assert_eq!(
            doc.temporal_layers,
            vec![TemporalLayer {
                var: "start1850Layer".to_string(),
                members: vec![RecordId::Marker(0), RecordId::Marker(1)],
            }]
        );
    }
}
