//! Error types for trace log ingestion.

use std::path::PathBuf;
use thiserror::Error;

use tracelog_model::ModelError;

/// Errors that stop an upload from producing a table.
///
/// A load error never affects previously loaded data; callers treat it as
/// "no data available" for the current render.
#[derive(Debug, Error)]
pub enum LoadError {
    // === Input Errors ===
    /// Upload contained no bytes (or only whitespace).
    #[error("{source_name} is empty")]
    Empty { source_name: String },

    /// Bytes are neither UTF-8 nor a supported legacy encoding.
    #[error("unsupported encoding in {source_name}: {encoding}")]
    UnsupportedEncoding {
        source_name: String,
        encoding: &'static str,
    },

    /// Failed to read a file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The content is not parseable as delimited tabular data.
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<polars::prelude::PolarsError> for LoadError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Errors raised while writing a table back out as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, LoadError>;
