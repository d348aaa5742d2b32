//! Reconciliation pipeline.
//!
//! Loads GeoNames feature and postal dumps, filters the feature table to
//! populated places, normalizes join keys on both sides, outer-joins them
//! and writes the result as a JSON array of records.

pub mod filter;
pub mod loader;
pub mod normalize;
pub mod reconcile;
pub mod writer;

#[cfg(test)]
pub mod tests;

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::models::{ProcessingStats, SourceKind};

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Runs the load, filter, normalize, join and write stages for one config
#[derive(Debug)]
pub struct GazetteerProcessor {
    config: ProcessorConfig,
    output_path: PathBuf,
}

impl GazetteerProcessor {
    /// Create a processor, rejecting configs with missing inputs
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        let output_path = config.require_output_path()?.clone();

        Ok(Self {
            config,
            output_path,
        })
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Run every stage up to the join and return the reconciled table
    ///
    /// The returned stats carry everything except the output path and timing.
    pub fn reconcile_tables(&self) -> Result<(DataFrame, ProcessingStats)> {
        let spinner = stage_spinner(self.config.show_progress);

        spinner.set_message("Loading place files");
        let places = loader::load_table(&self.config.geo_paths, SourceKind::Place)?;
        info!(
            "Loaded {} place rows from {} file(s)",
            places.height(),
            self.config.geo_paths.len()
        );

        spinner.set_message("Filtering populated places");
        let (places, filter_stats) = filter::filter_populated_places(&places)?;

        spinner.set_message("Loading postal files");
        let postal = loader::load_table(&self.config.postal_paths, SourceKind::Postal)?;
        info!(
            "Loaded {} postal rows from {} file(s)",
            postal.height(),
            self.config.postal_paths.len()
        );

        spinner.set_message("Normalizing join keys");
        let postal = normalize::normalize_postal(&postal)?;
        let places = normalize::normalize_places(&places)?;

        spinner.set_message("Joining postal codes to places");
        let (joined, join_stats) = reconcile::reconcile(&postal, &places)?;
        spinner.finish_and_clear();

        let stats = ProcessingStats {
            geo_files: self.config.geo_paths.len(),
            postal_files: self.config.postal_paths.len(),
            place_rows_loaded: filter_stats.rows_in,
            place_rows_kept: filter_stats.rows_kept,
            postal_rows_loaded: postal.height(),
            output_rows: joined.height(),
            join: join_stats,
            ..Default::default()
        };

        Ok((joined, stats))
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        info!(
            "Reconciling {} geo file(s) with {} postal file(s) into {}",
            self.config.geo_paths.len(),
            self.config.postal_paths.len(),
            self.output_path.display()
        );

        let (joined, stats) = self.reconcile_tables()?;

        let records = writer::records_from_frame(&joined)?;
        debug!("Writing {} records to {}", records.len(), self.output_path.display());
        let bytes = writer::write_records(&self.output_path, &records)?;
        info!("Wrote {} bytes to {}", bytes, self.output_path.display());

        Ok(ProcessingStats {
            output_path: self.output_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
            ..stats
        })
    }
}

/// Spinner for the in-memory stages, hidden unless progress is requested
fn stage_spinner(show_progress: bool) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Column as text with nulls read as empty strings
pub(crate) fn text_column(name: &str) -> Expr {
    col(name).cast(DataType::String).fill_null(lit(""))
}

/// Like [`text_column`], but a column the file never had reads as ""
pub(crate) fn text_or_empty(df: &DataFrame, name: &str) -> Expr {
    if has_column(df, name) {
        text_column(name)
    } else {
        lit("")
    }
}

/// Column cast to `dtype`, or all nulls when the table lacks it
pub(crate) fn column_or_null(df: &DataFrame, name: &str, dtype: DataType) -> Expr {
    if has_column(df, name) {
        col(name).cast(dtype)
    } else {
        lit(NULL).cast(dtype)
    }
}
