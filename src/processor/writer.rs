//! JSON output for reconciled tables
//!
//! Output is written whole: serialized in memory, written to a temporary
//! file beside the destination, then renamed over it. A failed run never
//! leaves a truncated file behind.

use crate::constants::output_columns;
use crate::error::{GeonamesError, Result};
use crate::models::ReconciledRecord;

use polars::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Convert the reconciled table into output records, one per row
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<ReconciledRecord>> {
    let city_name = df.column(output_columns::CITY_NAME)?.str()?;
    let alt_name = df.column(output_columns::ALT_NAME)?.str()?;
    let city_latitude = df.column(output_columns::CITY_LATITUDE)?.f64()?;
    let city_longitude = df.column(output_columns::CITY_LONGITUDE)?.f64()?;
    let state_code = df.column(output_columns::STATE_CODE)?.str()?;
    let postal_code = df.column(output_columns::POSTAL_CODE)?.str()?;
    let latitude = df.column(output_columns::LATITUDE)?.f64()?;
    let longitude = df.column(output_columns::LONGITUDE)?.f64()?;

    let records = (0..df.height())
        .map(|i| ReconciledRecord {
            city_name: city_name.get(i).map(str::to_string),
            alt_name: alt_name.get(i).map(str::to_string),
            city_latitude: finite(city_latitude.get(i)),
            city_longitude: finite(city_longitude.get(i)),
            state_code: state_code.get(i).map(str::to_string),
            postal_code: postal_code.get(i).map(str::to_string),
            latitude: finite(latitude.get(i)),
            longitude: finite(longitude.get(i)),
        })
        .collect();

    Ok(records)
}

/// JSON has no NaN, so a NaN coordinate is emitted as null
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Write records as one compact JSON array
pub fn write_records(path: &Path, records: &[ReconciledRecord]) -> Result<u64> {
    write_json_atomic(path, records, false)
}

/// Serialize `value` and atomically replace `path` with it
///
/// # Returns
///
/// Number of bytes written
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<u64> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| GeonamesError::output_write(path, e))?;
    temp.write_all(&bytes)
        .and_then(|_| temp.flush())
        .map_err(|e| GeonamesError::output_write(path, e))?;
    temp.persist(path)
        .map_err(|e| GeonamesError::output_write(path, e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn reconciled_frame() -> DataFrame {
        df!(
            output_columns::CITY_NAME => [Some("montréal"), Some("chicago")],
            output_columns::ALT_NAME => [Some("Montreal,Mourreal"), None],
            output_columns::CITY_LATITUDE => [Some(45.50884), None],
            output_columns::CITY_LONGITUDE => [Some(-73.58781), None],
            output_columns::STATE_CODE => [Some("QC"), Some("IL")],
            output_columns::POSTAL_CODE => [Some("H2X"), Some("60601")],
            output_columns::LATITUDE => [Some(45.5088), Some(41.88)],
            output_columns::LONGITUDE => [Some(-73.5878), Some(f64::NAN)],
        )
        .unwrap()
    }

    #[test]
    fn test_records_from_frame() {
        let records = records_from_frame(&reconciled_frame()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city_name.as_deref(), Some("montréal"));
        assert_eq!(records[0].city_latitude, Some(45.50884));
        assert_eq!(records[1].alt_name, None);
        assert_eq!(records[1].city_latitude, None);
        assert_eq!(records[1].postal_code.as_deref(), Some("60601"));
        assert_eq!(records[1].longitude, None);
    }

    #[test]
    fn test_missing_output_column_is_an_error() {
        let df = df!(output_columns::CITY_NAME => ["chicago"]).unwrap();
        assert!(records_from_frame(&df).is_err());
    }

    #[test]
    fn test_write_records_json_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let records = records_from_frame(&reconciled_frame()).unwrap();

        let bytes = write_records(&path, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(bytes as usize, text.len());
        // non-ASCII passes through unescaped
        assert!(text.contains("montréal"));
        assert!(!text.contains("\\u"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&String> = rows[1].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 8);
        assert!(rows[1]["alt_name"].is_null());
        assert!(rows[1]["city_longitude"].is_null());
        assert_eq!(rows[1]["state_code"], "IL");
    }

    #[test]
    fn test_key_order_follows_output_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let records = records_from_frame(&reconciled_frame()).unwrap();
        write_records(&path, &records).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let first_row = &text[..text.find('}').unwrap()];
        let positions: Vec<usize> = output_columns::ALL
            .iter()
            .map(|key| first_row.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_empty_table_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");

        write_records(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale contents").unwrap();

        write_json_atomic(&path, &vec![1, 2, 3], false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pretty.json");

        write_json_atomic(&path, &vec![1], true).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  1\n]");
    }

    #[test]
    fn test_unwritable_destination_is_output_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("out.json");

        match write_records(&path, &[]) {
            Err(GeonamesError::OutputWrite { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected OutputWrite error, got {:?}", other),
        }
    }
}
