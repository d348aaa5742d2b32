//! Scenario tests for the processor module
//!
//! Builds small GeoNames dumps in temporary directories and runs them
//! through the whole pipeline.


use crate::config::ProcessorConfig;
use crate::models::ReconciledRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One feature-dump line with the fields the pipeline reads
pub fn geo_row(
    asciiname: &str,
    admin1_code: &str,
    latitude: f64,
    longitude: f64,
    feature_code: &str,
) -> String {
    let feature_class = if feature_code.starts_with("PPL") { "P" } else { "A" };
    format!(
        "1\t{asciiname}\t{asciiname}\t\t{latitude}\t{longitude}\t{feature_class}\t{feature_code}\tUS\t\t{admin1_code}\t\t\t\t1000\t\t200\tAmerica/Chicago\t2024-01-01\n"
    )
}

/// One postal-dump line with the fields the pipeline reads
pub fn postal_row(
    postal_code: &str,
    place_name: &str,
    admin_code1: &str,
    latitude: f64,
    longitude: f64,
) -> String {
    format!(
        "US\t{postal_code}\t{place_name}\tState\t{admin_code1}\t\t\t\t\t{latitude}\t{longitude}\t4\n"
    )
}

pub fn write_dump(dir: &TempDir, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, rows.concat()).unwrap();
    path
}

pub fn config_for(geo: &[PathBuf], postal: &[PathBuf], output: &Path) -> ProcessorConfig {
    ProcessorConfig::new(geo.to_vec(), postal.to_vec(), output)
}

pub fn read_records(path: &Path) -> Vec<ReconciledRecord> {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Records reduced to a sortable form for order-independent comparison
pub fn row_set(records: &[ReconciledRecord]) -> Vec<String> {
    let mut rows: Vec<String> = records
        .iter()
        .map(|record| serde_json::to_string(record).unwrap())
        .collect();
    rows.sort();
    rows
}
