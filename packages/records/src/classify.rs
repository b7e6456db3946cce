//! Row classification for the staged spreadsheet export.
//!
//! Rows are read in file order, dispatched on the `Type` column and run
//! through a per-type required-field gate. Survivors are appended to their
//! collection; their position becomes their identifier.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr as _;

use worldmap_records_models::{
    CoordinateSource, MapRecord, MarkerRecord, Position, RecordDetails, RecordType, ShapeRecord,
};

use crate::index::CategoryIndex;
use crate::{Classified, RecordsError};

/// Column names of the spreadsheet export.
pub mod columns {
    pub const TYPE: &str = "Type";
    /// Tile URL for maps, source link for markers and shapes.
    pub const URL: &str = "URL";
    pub const TITLE: &str = "Title";
    pub const START_YEAR: &str = "Start Year";
    pub const END_YEAR: &str = "End Year";
    pub const HISTORIC_LAT: &str = "Historic Lat";
    pub const HISTORIC_LON: &str = "Historic Lon";
    pub const PRESENT_LAT: &str = "Present Lat";
    pub const PRESENT_LON: &str = "Present Lon";
    pub const CATEGORY: &str = "Category";
    pub const SUBCATEGORY: &str = "Sub Category";
    pub const DATE_RANGE: &str = "Date Range";
    pub const DESCRIPTION: &str = "Description";
    pub const HISTORIC_LOCATION: &str = "Historic Location";
    pub const PRESENT_LOCATION: &str = "Present Location";
    pub const SOURCE: &str = "Source";
    pub const GEOJSON: &str = "GeoJSON";
}

/// One spreadsheet line keyed by column name.
///
/// Headers and cells are trimmed, and invalid UTF-8 is replaced with
/// `U+FFFD`. If a header repeats, the right-most
/// column wins. Absent columns read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map_or("", String::as_str)
    }

    fn has(&self, column: &str) -> bool {
        !self.get(column).is_empty()
    }

    fn owned(&self, column: &str) -> String {
        self.get(column).to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut cells = BTreeMap::new();
        for (k, v) in iter {
            cells.insert(k.into(), v.into());
        }
        Self { cells }
    }
}

/// Classifies the staged CSV file at `path`.
///
/// # Errors
///
/// Returns [`RecordsError`] if the file cannot be opened or is not valid CSV.
pub fn classify_path(path: &Path) -> Result<Classified, RecordsError> {
    let file = std::fs::File::open(path)?;
    let classified = classify_reader(file)?;

    log::info!(
        "Classified {} maps, {} markers, {} shapes from {} ({} rows dropped)",
        classified.maps.len(),
        classified.markers.len(),
        classified.shapes.len(),
        path.display(),
        classified.dropped,
    );

    Ok(classified)
}

/// Classifies CSV rows read from `reader`.
///
/// # Errors
///
/// Returns [`RecordsError::Csv`] if the input is not valid CSV.
pub fn classify_reader<R: Read>(reader: R) -> Result<Classified, RecordsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_owned())
        .collect();

    let mut classified = Classified::default();

    // Cells are decoded lossily so a stray non-UTF-8 byte only affects its
    // own cell.
    for (line, result) in reader.byte_records().enumerate() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let cell = record.get(i).map(String::from_utf8_lossy).unwrap_or_default();
                (header.as_str(), cell.trim().to_owned())
            })
            .collect();

        if !classify_row(&row, &mut classified) {
            log::debug!("Dropping data row {}: type {:?}", line + 1, row.get(columns::TYPE));
            classified.dropped += 1;
        }
    }

    classified.categories = CategoryIndex::build(&classified.markers, &classified.shapes);

    Ok(classified)
}

/// Routes one row into its collection. Returns `false` if it was dropped.
fn classify_row(row: &RawRow, classified: &mut Classified) -> bool {
    let Ok(record_type) = RecordType::from_str(row.get(columns::TYPE)) else {
        return false;
    };

    let pushed = match record_type {
        RecordType::Map => map_from_row(row).map(|r| classified.maps.push(r)),
        RecordType::Marker => marker_from_row(row).map(|r| classified.markers.push(r)),
        RecordType::Shape => shape_from_row(row).map(|r| classified.shapes.push(r)),
    };

    pushed.is_some()
}

/// Builds a [`MapRecord`] if URL, title and both years are present.
#[must_use]
pub fn map_from_row(row: &RawRow) -> Option<MapRecord> {
    let required = [
        columns::URL,
        columns::TITLE,
        columns::START_YEAR,
        columns::END_YEAR,
    ];
    if !required.iter().all(|c| row.has(c)) {
        return None;
    }

    Some(MapRecord {
        url: row.owned(columns::URL),
        title: row.owned(columns::TITLE),
        start_year: row.owned(columns::START_YEAR),
        end_year: row.owned(columns::END_YEAR),
    })
}

/// Builds a [`MarkerRecord`] if category, subcategory, start year, title
/// and the present coordinate pair are present.
///
/// The present pair is the gate even though the historic pair is preferred
/// for the position when both of its fields are filled in.
#[must_use]
pub fn marker_from_row(row: &RawRow) -> Option<MarkerRecord> {
    let required = [
        columns::CATEGORY,
        columns::SUBCATEGORY,
        columns::START_YEAR,
        columns::TITLE,
        columns::PRESENT_LAT,
        columns::PRESENT_LON,
    ];
    if !required.iter().all(|c| row.has(c)) {
        return None;
    }

    let (position, coordinate_source) =
        if row.has(columns::HISTORIC_LAT) && row.has(columns::HISTORIC_LON) {
            (
                Position {
                    latitude: row.owned(columns::HISTORIC_LAT),
                    longitude: row.owned(columns::HISTORIC_LON),
                },
                CoordinateSource::Historic,
            )
        } else {
            (
                Position {
                    latitude: row.owned(columns::PRESENT_LAT),
                    longitude: row.owned(columns::PRESENT_LON),
                },
                CoordinateSource::Present,
            )
        };

    Some(MarkerRecord {
        position,
        coordinate_source,
        details: details_from_row(row),
    })
}

/// Builds a [`ShapeRecord`] if category, subcategory, start year, title
/// and `GeoJSON` are present.
#[must_use]
pub fn shape_from_row(row: &RawRow) -> Option<ShapeRecord> {
    let required = [
        columns::CATEGORY,
        columns::SUBCATEGORY,
        columns::START_YEAR,
        columns::TITLE,
        columns::GEOJSON,
    ];
    if !required.iter().all(|c| row.has(c)) {
        return None;
    }

    Some(ShapeRecord {
        geojson_text: row.owned(columns::GEOJSON),
        details: details_from_row(row),
    })
}

fn details_from_row(row: &RawRow) -> RecordDetails {
    RecordDetails {
        category: row.owned(columns::CATEGORY),
        subcategory: row.owned(columns::SUBCATEGORY),
        title: row.owned(columns::TITLE),
        description: row.owned(columns::DESCRIPTION),
        start_year: row.owned(columns::START_YEAR),
        end_year: row.owned(columns::END_YEAR),
        date_range_text: row.owned(columns::DATE_RANGE),
        historic_location: row.owned(columns::HISTORIC_LOCATION),
        present_location: row.owned(columns::PRESENT_LOCATION),
        source_name: row.owned(columns::SOURCE),
        source_url: row.owned(columns::URL),
    }
}
