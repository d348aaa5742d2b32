//! Record loading for GeoNames dumps
//!
//! Reads headerless tab-separated files into DataFrames using the fixed
//! positional schema of each source kind, and concatenates files of the
//! same kind into one logical table.

use crate::constants::{ColumnSpec, ColumnType, FIELD_SEPARATOR};
use crate::error::{GeonamesError, Result};
use crate::models::SourceKind;

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load and concatenate every file of one source kind, preserving file order
pub fn load_table(paths: &[PathBuf], kind: SourceKind) -> Result<DataFrame> {
    let Some(first) = paths.first() else {
        return Err(GeonamesError::argument(format!(
            "no {} files given to load",
            kind
        )));
    };

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        frames.push(load_file(path, kind)?);
    }

    if frames.len() == 1 {
        return Ok(frames.remove(0));
    }

    debug!("Concatenating {} {} files", frames.len(), kind);
    let lazy_frames: Vec<LazyFrame> = frames.into_iter().map(|df| df.lazy()).collect();

    // Files may be ragged against each other, so align columns by name
    concat_lf_diagonal(lazy_frames, UnionArgs::default())
        .and_then(|lf| lf.collect())
        .map_err(|e| GeonamesError::input_format(first, format!("failed to concatenate: {}", e)))
}

/// Load a single headerless TSV file with the schema for `kind`
pub fn load_file(path: &Path, kind: SourceKind) -> Result<DataFrame> {
    debug!("Loading {} file: {}", kind, path.display());

    let schema = kind.columns();

    // GeoNames fields are never quoted and alternate names may contain '"'.
    // Empty and missing trailing cells load as "" rather than null.
    let parse_options = CsvParseOptions::default()
        .with_separator(FIELD_SEPARATOR)
        .with_quote_char(None)
        .with_missing_is_null(false);

    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| GeonamesError::input_format(path, e))?;

    let width = df.width();
    if width > schema.len() {
        return Err(GeonamesError::input_format(
            path,
            format!(
                "found {} columns, {} schema has only {}",
                width,
                kind,
                schema.len()
            ),
        ));
    }

    let present = &schema[..width];
    df.set_column_names(present.iter().map(|spec| spec.name))
        .map_err(|e| GeonamesError::input_format(path, e))?;

    let typed = apply_column_types(df, present).map_err(|e| GeonamesError::input_format(path, e))?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        typed.height(),
        typed.width(),
        path.display()
    );
    Ok(typed)
}

/// Cast numeric columns; cells that do not parse become null
fn apply_column_types(df: DataFrame, columns: &[ColumnSpec]) -> PolarsResult<DataFrame> {
    let casts: Vec<Expr> = columns
        .iter()
        .filter_map(|spec| match spec.column_type {
            ColumnType::Text => None,
            ColumnType::Integer => Some(col(spec.name).cast(DataType::Int64)),
            ColumnType::Float => Some(col(spec.name).cast(DataType::Float64)),
        })
        .collect();

    if casts.is_empty() {
        return Ok(df);
    }

    df.lazy().with_columns(casts).collect()
}
