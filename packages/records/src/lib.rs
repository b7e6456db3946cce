#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spreadsheet row classification and record grouping.
//!
//! [`classify::classify_path`] reads the staged CSV export and partitions
//! its rows into maps, markers and shapes. Alongside the collections it
//! builds the [`index::CategoryIndex`]; [`temporal::TemporalGroups`] is
//! derived from the classified collections afterwards.
//!
//! Rows that fail the per-type required-field gate are dropped without
//! error. Ingestion is best-effort by policy: a bad row produces a smaller
//! map, never a failed run.

pub mod classify;
pub mod index;
pub mod temporal;

use worldmap_records_models::{MapRecord, MarkerRecord, ShapeRecord};

use crate::index::CategoryIndex;

/// Errors that can occur while reading the staged spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    /// The staging file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The output of one classification pass.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Base maps in row order. Position is the `map<N>` identifier.
    pub maps: Vec<MapRecord>,
    /// Markers in row order. Position is the `marker<N>` identifier.
    pub markers: Vec<MarkerRecord>,
    /// Shapes in row order. Position is the `shape<N>` identifier.
    pub shapes: Vec<ShapeRecord>,
    /// Markers then shapes grouped by category and subcategory.
    pub categories: CategoryIndex,
    /// Rows dropped for an unknown `Type` or a missing required field.
    pub dropped: u64,
}
