//! Trace log ingestion.
//!
//! Turns the bytes of one uploaded inspection log into a [`CanonicalTable`]:
//! decoding, CSV parsing, exact-duplicate removal, categorical trimming,
//! timestamp parsing and period derivation.
//!
//! # Features
//!
//! - **Normalization**: [`normalize`] is a pure function of the input bytes
//! - **Caching**: [`TableCache`] reuses the last table when the same bytes are uploaded again
//! - **Export**: [`write_csv`] writes a table (or any row subset) back out as CSV
//!
//! # Example
//!
//! ```ignore
//! use tracelog_ingest::{TableCache, normalize};
//!
//! let bytes = std::fs::read("trace.csv")?;
//! let normalized = normalize("trace.csv", &bytes)?;
//! println!("{} rows", normalized.table.len());
//!
//! let mut cache = TableCache::new();
//! let load = cache.load("trace.csv", &bytes)?;
//! ```
//!
//! [`CanonicalTable`]: tracelog_model::CanonicalTable

mod cache;
mod datetime;
mod decode;
mod error;
mod export;
mod normalize;
mod polars_utils;
mod reader;

// === Error Types ===
pub use error::{ExportError, LoadError, Result};

// === Normalization ===
pub use datetime::parse_timestamp;
pub use decode::decode_input;
pub use normalize::{NormalizedTable, dedupe_records, normalize};

// === File Loading ===
pub use reader::read_frame;

// === Caching ===
pub use cache::{CacheStatus, CachedLoad, TableCache, content_hash};

// === Export ===
pub use export::{to_csv_bytes, write_csv, write_records};

// === Polars Helpers ===
pub use polars_utils::{any_to_cell, frame_rows};

use std::path::Path;

/// An upload as read from disk: display name and raw bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Read a file from disk as an upload named after the file.
pub fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Uploaded File".to_string());
    Ok(Upload { name, bytes })
}
