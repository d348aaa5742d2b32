//! Error handling for gazetteer reconciliation.
//!
//! Every failure the pipeline can hit is fatal: a source file that cannot be
//! read, a missing command-line input, or an output path that cannot be
//! written. Path context is carried wherever a file is involved.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeonamesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input file: {path} - {reason}")]
    InputFormat { path: PathBuf, reason: String },

    #[error("Invalid arguments: {message}")]
    Argument { message: String },

    #[error("Failed to write output file: {path} - {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}

impl GeonamesError {
    /// Create an input format error for a specific file
    pub fn input_format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InputFormat {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create an output write error for a specific destination
    pub fn output_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeonamesError>;
