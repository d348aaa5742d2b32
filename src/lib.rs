//! GeoNames Processor Library
//!
//! Reconciles GeoNames postal code dumps with GeoNames populated-place
//! dumps into a single JSON reference table, and builds geohash bucket
//! indexes over the result.
//!
//! This library provides tools for:
//! - Loading headerless GeoNames TSV dumps with fixed positional schemas
//! - Filtering feature tables down to populated places
//! - Normalizing place names and admin codes so both sources share join keys
//! - Full outer joining postal codes to places, keeping unmatched rows
//! - Writing the joined table atomically as a JSON array
//! - Bucketing postal-code coordinates by geohash prefix

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geohash_index;
pub mod models;
pub mod processor;

pub use config::{IndexConfig, ProcessorConfig};
pub use error::{GeonamesError, Result};
pub use models::{IndexStats, ProcessingStats, ReconciledRecord, SourceKind};
pub use processor::GazetteerProcessor;
