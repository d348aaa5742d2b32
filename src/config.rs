//! Configuration management and validation.
//!
//! Provides configuration structures for the reconciliation pipeline and
//! the geohash indexer, with validation of the required inputs.

use crate::constants::{DEFAULT_GEOHASH_PRECISION, MAX_GEOHASH_PRECISION};
use crate::error::{GeonamesError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Configuration for one reconciliation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// GeoNames feature files, concatenated in this order
    pub geo_paths: Vec<PathBuf>,

    /// GeoNames postal code files, concatenated in this order
    pub postal_paths: Vec<PathBuf>,

    /// Destination JSON file
    pub output_path: Option<PathBuf>,

    /// Show spinners while loading and joining
    pub show_progress: bool,
}

impl ProcessorConfig {
    pub fn new(
        geo_paths: Vec<PathBuf>,
        postal_paths: Vec<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            geo_paths,
            postal_paths,
            output_path: Some(output_path.into()),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check that every required input is present
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        if self.geo_paths.is_empty() {
            missing.push("at least one --geo file");
        }
        if self.postal_paths.is_empty() {
            missing.push("at least one --postal file");
        }
        if self.output_path.is_none() {
            missing.push("an output file");
        }

        if !missing.is_empty() {
            return Err(GeonamesError::argument(format!(
                "must provide {}",
                missing.join(", ")
            )));
        }

        debug!(
            "Configuration valid: {} geo file(s), {} postal file(s)",
            self.geo_paths.len(),
            self.postal_paths.len()
        );
        Ok(())
    }

    /// Output path after validation
    pub fn require_output_path(&self) -> Result<&PathBuf> {
        self.output_path
            .as_ref()
            .ok_or_else(|| GeonamesError::argument("must provide an output file"))
    }
}

/// Configuration for building a geohash bucket index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    /// Geohash prefix length
    pub precision: usize,

    /// Write compact JSON instead of two-space indented JSON
    pub compact: bool,
}

impl IndexConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            precision: DEFAULT_GEOHASH_PRECISION,
            compact: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_GEOHASH_PRECISION).contains(&self.precision) {
            return Err(GeonamesError::argument(format!(
                "precision must be between 1 and {}, got {}",
                MAX_GEOHASH_PRECISION, self.precision
            )));
        }
        Ok(())
    }
}
