//! Rendering of a [`MapDocument`] as the Leaflet data script.
//!
//! Rendering is pure: the same document always yields the same text.

use std::fmt::{self, Display, Formatter};

use worldmap_records_models::RecordId;

use crate::document::{Geometry, MapDocument, Overlay};
use crate::naming;

impl Display for MapDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Leaflet data, compiled on {}", self.stamp)?;
        writeln!(f)?;

        self.fmt_basemaps(f)?;
        self.fmt_overlays(f)?;
        self.fmt_temporal_groups(f)?;
        self.fmt_groups(f)?;
        self.fmt_selectors(f)?;
        self.fmt_viewport(f)?;
        self.fmt_functions(f)
    }
}

impl MapDocument {
    fn fmt_basemaps(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Base maps")?;
        for basemap in &self.basemaps {
            writeln!(
                f,
                "var {} = L.tileLayer({}, {{maxZoom: {}, minZoom: {}, tms: true}});",
                basemap.id,
                js_string(&basemap.url),
                basemap.max_zoom,
                basemap.min_zoom,
            )?;
        }
        writeln!(f)
    }

    fn fmt_overlays(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Markers and shapes")?;
        for overlay in &self.overlays {
            fmt_overlay(f, overlay)?;
        }
        writeln!(f)
    }

    fn fmt_temporal_groups(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Temporal groups")?;
        for layer in &self.temporal_layers {
            writeln!(f, "var {} = L.layerGroup({});", layer.var, id_list(&layer.members))?;
        }
        writeln!(f)
    }

    fn fmt_groups(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Subcategory and category groups")?;
        for sub in &self.subcategories {
            writeln!(
                f,
                "var {} = new L.MarkerClusterGroup({{ clusterClass: {} }});",
                sub.cluster_var,
                js_string(&sub.css_class),
            )?;
            writeln!(f, "var {} = {};", sub.members_var, id_list(&sub.members))?;
            writeln!(f, "var {} = L.layerGroup({});", sub.layer_var, sub.members_var)?;
        }
        for category in &self.categories {
            writeln!(
                f,
                "var {} = L.layerGroup({});",
                category.layer_var,
                id_list(&category.members),
            )?;
        }
        for sub in &self.subcategories {
            writeln!(f, "{}.addLayer({});", sub.cluster_var, sub.layer_var)?;
        }
        writeln!(f)
    }

    fn fmt_selectors(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let base_layers = self
            .basemaps
            .iter()
            .map(|b| format!("\t{}: {}", js_string(&b.title), b.id))
            .collect::<Vec<_>>();
        writeln!(f, "var baseLayers = {};", object(&base_layers, ""))?;
        writeln!(f)?;

        let themes = self
            .themes
            .iter()
            .map(|theme| {
                let entries = theme
                    .entries
                    .iter()
                    .map(|(label, cluster)| format!("\t\t{}: {cluster}", js_string(label)))
                    .collect::<Vec<_>>();
                format!("\t{}: {}", js_string(&theme.name), object(&entries, "\t"))
            })
            .collect::<Vec<_>>();
        writeln!(f, "var groupedOverlays = {};", object(&themes, ""))?;
        writeln!(f)?;

        for theme in &self.themes {
            let clusters = theme
                .entries
                .iter()
                .map(|(_, cluster)| cluster.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "var {} = [{clusters}];", theme.layers_var())?;
            writeln!(
                f,
                "$(document).on('change', '#{}', function () {{ setThemeVisible({}, this.checked); }});",
                theme.control_id(),
                theme.layers_var(),
            )?;
        }
        writeln!(f)
    }

    fn fmt_viewport(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = &self.viewport;
        writeln!(
            f,
            "var southWest = L.latLng({}, {});",
            view.south_west[0], view.south_west[1]
        )?;
        writeln!(
            f,
            "var northEast = L.latLng({}, {});",
            view.north_east[0], view.north_east[1]
        )?;
        writeln!(f, "var bounds = L.latLngBounds(southWest, northEast);")?;
        writeln!(f)?;
        writeln!(
            f,
            "var map = L.map('map', {{ center: [{}, {}], zoom: {}, maxBounds: bounds }});",
            view.center[0], view.center[1], view.zoom
        )?;
        writeln!(
            f,
            "L.control.groupedLayers(baseLayers, groupedOverlays).addTo(map);"
        )?;
        for sub in &self.subcategories {
            writeln!(f, "map.addLayer({});", sub.cluster_var)?;
        }
        writeln!(f)
    }

    fn fmt_functions(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "function setBasemap(time) {{")?;
        for basemap in &self.basemaps {
            writeln!(
                f,
                "\tif (time >= {} && time <= {}) {{",
                basemap.start_year, basemap.end_year
            )?;
            for other in self.basemaps.iter().filter(|b| b.id != basemap.id) {
                writeln!(f, "\t\tmap.removeLayer({});", other.id)?;
            }
            writeln!(f, "\t\tmap.addLayer({});", basemap.id)?;
            writeln!(f, "\t}}")?;
        }
        writeln!(f, "}};")?;
        writeln!(f)?;

        writeln!(f, "function isVisible(options, time) {{")?;
        writeln!(f, "\tif (options.kind === 'start') {{")?;
        writeln!(f, "\t\treturn time >= options.syear;")?;
        writeln!(f, "\t}}")?;
        writeln!(f, "\tif (options.kind === 'iso') {{")?;
        writeln!(f, "\t\treturn time === options.syear;")?;
        writeln!(f, "\t}}")?;
        writeln!(f, "\treturn time >= options.syear && time <= options.eyear;")?;
        writeln!(f, "}};")?;
        writeln!(f)?;

        writeln!(f, "function rebuildLayers(time) {{")?;
        writeln!(
            f,
            "\tvar visible = function (layer) {{ return isVisible(layer.options, time); }};"
        )?;
        for sub in &self.subcategories {
            writeln!(f, "\t{}.removeLayer({});", sub.cluster_var, sub.layer_var)?;
            writeln!(
                f,
                "\t{} = L.layerGroup({}.filter(visible));",
                sub.layer_var, sub.members_var
            )?;
            writeln!(f, "\t{}.addLayer({});", sub.cluster_var, sub.layer_var)?;
        }
        writeln!(f, "}};")?;
        writeln!(f)?;

        writeln!(f, "function setThemeVisible(layers, visible) {{")?;
        writeln!(f, "\tlayers.forEach(function (layer) {{")?;
        writeln!(f, "\t\tif (visible) {{")?;
        writeln!(f, "\t\t\tmap.addLayer(layer);")?;
        writeln!(f, "\t\t}} else {{")?;
        writeln!(f, "\t\t\tmap.removeLayer(layer);")?;
        writeln!(f, "\t\t}}")?;
        writeln!(f, "\t}});")?;
        writeln!(f, "}};")?;
        writeln!(f)?;

        writeln!(f, "function setData(time) {{")?;
        writeln!(f, "\tsetBasemap(time);")?;
        writeln!(f, "\trebuildLayers(time);")?;
        writeln!(f, "}};")
    }
}

fn fmt_overlay(f: &mut Formatter<'_>, overlay: &Overlay) -> fmt::Result {
    let mut options = format!(
        "kind: '{}', syear: {}",
        overlay.temporal.kind(),
        overlay.temporal.start_year()
    );
    if let Some(end) = overlay.temporal.end_year() {
        options.push_str(&format!(", eyear: {end}"));
    }

    match &overlay.geometry {
        Geometry::Point {
            latitude,
            longitude,
        } => writeln!(
            f,
            "var {} = L.marker([{latitude}, {longitude}], {{icon: {}, {options}}});",
            overlay.id,
            naming::icon_var(&overlay.subcategory),
        )?,
        Geometry::GeoJson { var, text } => {
            writeln!(f, "var {var} = {text};")?;
            writeln!(
                f,
                "var {} = L.geoJson({var}, {{style: {}, {options}}});",
                overlay.id,
                naming::shape_style_var(&overlay.subcategory),
            )?;
        }
    }

    writeln!(f, "{}.bindPopup({});", overlay.id, js_string(&overlay.popup))
}

/// Double-quoted, escaped JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn id_list(ids: &[RecordId]) -> String {
    let ids = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", ids.join(", "))
}

/// Multi-line object literal from pre-indented `key: value` entries.
fn object(entries: &[String], indent: &str) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    format!("{{\n{}\n{indent}}}", entries.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{STAMP, classified, settings};

    fn render(stamp: &str) -> String {
        MapDocument::build(&classified(), &settings(""), stamp).to_string()
    }

    #[test]
    fn starts_with_stamped_header() {
        assert!(render(STAMP).starts_with("// Leaflet data, compiled on 2014-03-07@09:05:02\n"));
    }

    #[test]
    fn declares_basemaps_with_zoom_bounds() {
        let script = render(STAMP);
        assert!(script.contains(
            "var map0 = L.tileLayer(\"tiles/1800/{z}/{x}/{y}.png\", {maxZoom: 6, minZoom: 2, tms: true});"
        ));
        assert!(script.contains("\t\"1800\": map0,\n\t\"1850\": map1\n"));
    }

    #[test]
    fn markers_carry_icon_and_temporal_options() {
        let script = render(STAMP);
        assert!(script.contains(
            "var marker0 = L.marker([44.89, -93.18], {icon: FortsIcon, kind: 'start', syear: 1850});"
        ));
        assert!(script.contains(
            "var marker1 = L.marker([23.1, 113.2], {icon: ConsulatesIcon, kind: 'iso', syear: 1850, eyear: 1850});"
        ));
        assert!(script.contains(
            "var marker2 = L.marker([45.6, -122.6], {icon: FortsIcon, kind: 'range', syear: 1825, eyear: 1860});"
        ));
    }

    #[test]
    fn shapes_embed_geojson_and_style() {
        let script = render(STAMP);
        assert!(script.contains("var json0 = {\"type\":\"Polygon\"};\n"));
        assert!(script.contains(
            "var shape0 = L.geoJson(json0, {style: ClaimsShapeStyle, kind: 'range', syear: 1818, eyear: 1846});"
        ));
    }

    #[test]
    fn popups_are_escaped_string_literals() {
        let script = render(STAMP);
        assert!(script.contains("marker0.bindPopup(\"<p><b><u>Fort Snelling</u></b><br/><b>Year:</b> 1850"));
        assert!(script.contains("shape0.bindPopup(\"<p><b><u>Oregon Country</u></b><br/><b>Years:</b> 1818 - 1846"));
    }

    #[test]
    fn temporal_groups_cover_each_kind() {
        let script = render(STAMP);
        assert!(script.contains("var start1850Layer = L.layerGroup([marker0]);"));
        assert!(script.contains("var iso1850Layer = L.layerGroup([marker1]);"));
        assert!(script.contains("var range1825_1860Layer = L.layerGroup([marker2]);"));
        assert!(script.contains("var range1818_1846Layer = L.layerGroup([shape0]);"));
    }

    #[test]
    fn subcategory_groups_and_overlay_selector() {
        let script = render(STAMP);
        assert!(script.contains(
            "var FortsMarkers = new L.MarkerClusterGroup({ clusterClass: \"forts\" });\n\
             var FortsMembers = [marker0, marker2];\n\
             var FortsLayer = L.layerGroup(FortsMembers);\n"
        ));
        assert!(script.contains("var MilitaryCategoryLayer = L.layerGroup([marker0, marker2]);"));
        assert!(script.contains("FortsMarkers.addLayer(FortsLayer);"));
        assert!(script.contains("\t\"Military\": {\n\t\t\"Forts\": FortsMarkers\n\t}"));
        assert!(script.contains("var theme0Layers = [FortsMarkers];"));
        assert!(script.contains(
            "$(document).on('change', '#theme-0', function () { setThemeVisible(theme0Layers, this.checked); });"
        ));
        assert!(script.contains("map.addLayer(ClaimsMarkers);"));
    }

    #[test]
    fn viewport_uses_configured_bounds() {
        let script = render(STAMP);
        assert!(script.contains("var southWest = L.latLng(-68.13885, -178.59385);"));
        assert!(script.contains("var northEast = L.latLng(79.68718, 189.14063);"));
        assert!(script.contains(
            "var map = L.map('map', { center: [20, -35], zoom: 2, maxBounds: bounds });"
        ));
    }

    #[test]
    fn set_basemap_swaps_to_the_matching_map() {
        let script = render(STAMP);
        assert!(script.contains(
            "\tif (time >= 1775 && time <= 1820) {\n\
             \t\tmap.removeLayer(map1);\n\
             \t\tmap.addLayer(map0);\n\
             \t}\n"
        ));
    }

    #[test]
    fn visibility_predicate_per_temporal_kind() {
        let script = render(STAMP);
        assert!(script.contains(
            "function isVisible(options, time) {\n\
             \tif (options.kind === 'start') {\n\
             \t\treturn time >= options.syear;\n\
             \t}\n\
             \tif (options.kind === 'iso') {\n\
             \t\treturn time === options.syear;\n\
             \t}\n\
             \treturn time >= options.syear && time <= options.eyear;\n\
             };\n"
        ));
    }

    #[test]
    fn rebuild_filters_members_by_visibility() {
        let script = render(STAMP);
        assert!(script.contains(
            "\tFortsMarkers.removeLayer(FortsLayer);\n\
             \tFortsLayer = L.layerGroup(FortsMembers.filter(visible));\n\
             \tFortsMarkers.addLayer(FortsLayer);\n"
        ));
        assert!(script.contains("function setData(time) {\n\tsetBasemap(time);\n\trebuildLayers(time);\n};\n"));
    }

    #[test]
    fn renders_are_identical_apart_from_the_header() {
        let first = render("2014-03-07@09:05:02");
        let second = render("2015-01-01@00:00:00");
        assert_ne!(first, second);
        assert_eq!(first.lines().skip(1).collect::<Vec<_>>(), second.lines().skip(1).collect::<Vec<_>>());
    }
}
