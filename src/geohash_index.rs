//! Geohash bucket index over reconciled postal records.
//!
//! Reads the JSON array written by the reconciliation pipeline and groups
//! postal-code points by geohash prefix, so that nearby postal codes can be
//! found by key lookup. Only the postal-side coordinates are indexed; the
//! place centroid is a different point and is never used as a fallback.

use crate::config::IndexConfig;
use crate::error::{GeonamesError, Result};
use crate::models::IndexStats;
use crate::processor::writer::write_json_atomic;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// `[postal_code, latitude, longitude]`, serialized as a JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostalPoint(pub String, pub f64, pub f64);

/// Buckets keyed by geohash, iterated in lexicographic key order
pub type GeohashIndex = BTreeMap<String, Vec<PostalPoint>>;

/// Read the top-level record array from a reconciled JSON file
pub fn read_records(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|e| GeonamesError::input_format(path, e))?;
    let value: Value =
        serde_json::from_str(&text).map_err(|e| GeonamesError::input_format(path, e))?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Err(GeonamesError::input_format(
            path,
            "expected a top-level JSON array of records",
        )),
    }
}

/// Postal code and coordinates of one record, if it has all three
pub fn extract_point(record: &Value) -> Option<PostalPoint> {
    let postal_code = match record.get("postal_code")? {
        Value::String(code) => code.clone(),
        Value::Number(code) => code.to_string(),
        _ => return None,
    };
    let latitude = record.get("latitude")?.as_f64()?;
    let longitude = record.get("longitude")?.as_f64()?;

    Some(PostalPoint(postal_code, latitude, longitude))
}

/// Group records into geohash buckets of length `precision`
///
/// Records without a postal code or numeric coordinates are skipped, as are
/// coordinates outside the valid latitude/longitude range.
pub fn build_index(records: &[Value], precision: usize) -> (GeohashIndex, IndexStats) {
    let mut index = GeohashIndex::new();
    let mut stats = IndexStats {
        precision,
        ..Default::default()
    };

    for record in records {
        let Some(point) = extract_point(record) else {
            stats.skipped += 1;
            continue;
        };

        let coord = geohash::Coord {
            x: point.2,
            y: point.1,
        };
        match geohash::encode(coord, precision) {
            Ok(key) => {
                index.entry(key).or_default().push(point);
                stats.kept += 1;
            }
            Err(e) => {
                warn!("Skipping postal code {}: {}", point.0, e);
                stats.skipped += 1;
            }
        }
    }

    stats.buckets = index.len();
    debug!("Built {} geohash buckets", stats.buckets);
    (index, stats)
}

/// Read, index and write in one pass
pub fn run(config: &IndexConfig) -> Result<IndexStats> {
    config.validate()?;

    info!(
        "Indexing {} at precision {}",
        config.input_path.display(),
        config.precision
    );
    let records = read_records(&config.input_path)?;
    let (index, stats) = build_index(&records, config.precision);
    info!("{}", stats);

    write_json_atomic(&config.output_path, &index, !config.compact)?;
    Ok(stats)
}
