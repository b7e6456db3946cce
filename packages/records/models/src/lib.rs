#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types for the historical world map dataset.
//!
//! Every spreadsheet row that survives classification becomes one of
//! [`MapRecord`], [`MarkerRecord`] or [`ShapeRecord`]. Year, coordinate and
//! geometry values are kept as the raw cell text; they are interpreted by
//! the map front end, not here.

use strum_macros::{Display, EnumString};

/// The `Type` column discriminator of a spreadsheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum RecordType {
    /// A historical base map rendered as a tile layer
    Map,
    /// A point event or entity
    Marker,
    /// An area or region described by embedded `GeoJSON`
    Shape,
}

/// Stable identifier of a classified record.
///
/// The index is the record's zero-based position within its collection.
/// The [`Display`](std::fmt::Display) form (`map3`, `marker12`, `shape0`) is
/// also the variable name used in the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordId {
    /// Position in the map collection.
    Map(usize),
    /// Position in the marker collection.
    Marker(usize),
    /// Position in the shape collection.
    Shape(usize),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map(i) => write!(f, "map{i}"),
            Self::Marker(i) => write!(f, "marker{i}"),
            Self::Shape(i) => write!(f, "shape{i}"),
        }
    }
}

/// A base tile layer valid over `[start_year, end_year]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRecord {
    /// Tile URL template (e.g. `tiles/{z}/{x}/{y}.png`).
    pub url: String,
    /// Label shown in the base layer selector.
    pub title: String,
    pub start_year: String,
    pub end_year: String,
}

/// Which coordinate pair a marker position was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    /// The `Historic Lat`/`Historic Lon` pair
    Historic,
    /// The `Present Lat`/`Present Lon` pair
    Present,
}

/// A latitude/longitude pair as raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub latitude: String,
    pub longitude: String,
}

/// Descriptive fields shared by markers and shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDetails {
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub description: String,
    pub start_year: String,
    /// Empty when the record has no end year.
    pub end_year: String,
    /// Free-form date text that overrides the computed year line in popups.
    pub date_range_text: String,
    pub historic_location: String,
    pub present_location: String,
    /// Citation label.
    pub source_name: String,
    /// Citation link, only rendered together with `source_name`.
    pub source_url: String,
}

impl RecordDetails {
    /// Derives the temporal visibility rule from the year fields.
    #[must_use]
    pub fn temporal(&self) -> Temporal {
        if self.end_year.is_empty() {
            Temporal::Start {
                year: self.start_year.clone(),
            }
        } else if self.end_year == self.start_year {
            Temporal::Iso {
                year: self.start_year.clone(),
            }
        } else {
            Temporal::Range {
                start: self.start_year.clone(),
                end: self.end_year.clone(),
            }
        }
    }
}

/// A point-in-space event or entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    /// Resolved position (historic pair preferred over present pair).
    pub position: Position,
    pub coordinate_source: CoordinateSource,
    pub details: RecordDetails,
}

/// An area or region entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRecord {
    /// Embedded `GeoJSON` geometry, emitted verbatim.
    pub geojson_text: String,
    pub details: RecordDetails,
}

/// The three time-visibility rules a marker or shape can follow.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum TemporalKind {
    /// Visible from the start year onward
    Start,
    /// Visible only in a single year
    Iso,
    /// Visible over an inclusive interval
    Range,
}

/// A temporal rule together with the years it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Temporal {
    /// No end year.
    Start { year: String },
    /// Start year equals end year.
    Iso { year: String },
    /// Distinct start and end years.
    Range { start: String, end: String },
}

impl Temporal {
    #[must_use]
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::Start { .. } => TemporalKind::Start,
            Self::Iso { .. } => TemporalKind::Iso,
            Self::Range { .. } => TemporalKind::Range,
        }
    }

    /// Key of the temporal group this rule belongs to: the year for
    /// `start`/`iso`, `<start>_<end>` for `range`.
    #[must_use]
    pub fn group_key(&self) -> String {
        match self {
            Self::Start { year } | Self::Iso { year } => year.clone(),
            Self::Range { start, end } => format!("{start}_{end}"),
        }
    }

    #[must_use]
    pub fn start_year(&self) -> &str {
        match self {
            Self::Start { year } | Self::Iso { year } => year,
            Self::Range { start, .. } => start,
        }
    }

    /// End year, or `None` for `start` rules.
    #[must_use]
    pub fn end_year(&self) -> Option<&str> {
        match self {
            Self::Start { .. } => None,
            Self::Iso { year } => Some(year),
            Self::Range { end, .. } => Some(end),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn details(start: &str, end: &str) -> RecordDetails {
        RecordDetails {
            start_year: start.to_string(),
            end_year: end.to_string(),
            ..RecordDetails::default()
        }
    }

    #[test]
    fn empty_end_year_is_start() {
        let temporal = details("1850", "").temporal();
        assert_eq!(temporal.kind(), TemporalKind::Start);
        assert_eq!(temporal.group_key(), "1850");
        assert_eq!(temporal.end_year(), None);
    }

    #[test]
    fn equal_years_are_iso() {
        let temporal = details("1850", "1850").temporal();
        assert_eq!(temporal.kind(), TemporalKind::Iso);
        assert_eq!(temporal.group_key(), "1850");
        assert_eq!(temporal.end_year(), Some("1850"));
    }

    #[test]
    fn distinct_years_are_range() {
        let temporal = details("1800", "1810").temporal();
        assert_eq!(temporal.kind(), TemporalKind::Range);
        assert_eq!(temporal.group_key(), "1800_1810");
        assert_eq!(temporal.start_year(), "1800");
    }

    #[test]
    fn record_type_parses_exact_names_only() {
        assert_eq!(RecordType::from_str("Map").unwrap(), RecordType::Map);
        assert_eq!(RecordType::from_str("Shape").unwrap(), RecordType::Shape);
        assert!(RecordType::from_str("marker").is_err());
        assert!(RecordType::from_str("").is_err());
    }

    #[test]
    fn record_ids_render_as_variable_names() {
        assert_eq!(RecordId::Map(0).to_string(), "map0");
        assert_eq!(RecordId::Marker(12).to_string(), "marker12");
        assert_eq!(RecordId::Shape(3).to_string(), "shape3");
    }

    #[test]
    fn temporal_kind_labels() {
        assert_eq!(TemporalKind::Start.to_string(), "start");
        assert_eq!(TemporalKind::Iso.to_string(), "iso");
        assert_eq!(TemporalKind::Range.to_string(), "range");
    }
}
