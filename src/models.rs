//! Core data structures and types for gazetteer reconciliation.
//!
//! Defines the source kinds, the output record, and the statistics
//! reported by each pipeline stage.

use crate::constants::{ColumnSpec, GEO_COLUMNS, POSTAL_COLUMNS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The two kinds of GeoNames source file the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Populated-place feature dump
    Place,
    /// Postal code dump
    Postal,
}

impl SourceKind {
    /// Positional column schema for this source kind
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            SourceKind::Place => GEO_COLUMNS,
            SourceKind::Postal => POSTAL_COLUMNS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Place => "geo",
            SourceKind::Postal => "postal",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the reconciled reference table.
///
/// Field order is the JSON key order. A side missing from the outer join
/// leaves its fields as `None`, which serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    pub city_name: Option<String>,
    pub alt_name: Option<String>,
    pub city_latitude: Option<f64>,
    pub city_longitude: Option<f64>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Row counts from the feature filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub rows_in: usize,
    pub rows_kept: usize,
}

impl FilterStats {
    pub fn rows_removed(&self) -> usize {
        self.rows_in - self.rows_kept
    }
}

/// Row counts from the outer join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// Rows carrying both a postal and a place side
    pub matched_rows: usize,
    /// Postal rows with no place partner
    pub postal_only_rows: usize,
    /// Place rows with no postal partner
    pub place_only_rows: usize,
}

impl JoinStats {
    pub fn total_rows(&self) -> usize {
        self.matched_rows + self.postal_only_rows + self.place_only_rows
    }

    /// Share of output rows that found a partner, as a percentage
    pub fn match_rate(&self) -> f64 {
        let total = self.total_rows();
        if total == 0 {
            0.0
        } else {
            (self.matched_rows as f64 / total as f64) * 100.0
        }
    }
}

/// Processing statistics for one reconciliation run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub geo_files: usize,
    pub postal_files: usize,
    pub place_rows_loaded: usize,
    pub place_rows_kept: usize,
    pub postal_rows_loaded: usize,
    pub output_rows: usize,
    pub join: JoinStats,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

/// Counts reported by the geohash indexer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub kept: usize,
    pub skipped: usize,
    pub buckets: usize,
    pub precision: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept={} skipped={} buckets={} precision={}",
            self.kept, self.skipped, self.buckets, self.precision
        )
    }
}
