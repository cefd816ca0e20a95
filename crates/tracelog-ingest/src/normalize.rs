//! The normalization pipeline: raw upload bytes to a [`CanonicalTable`].
//!
//! Steps run in a fixed order:
//!
//! 1. decode and parse rows, keeping the original column order
//! 2. drop exact-duplicate rows (every column compared)
//! 3. trim and coerce the categorical columns to text
//! 4. parse the timestamp column (unparseable values become absent)
//! 5. derive the period key for every row with a timestamp
//!
//! Step 3 and 4 can make two formerly distinct rows identical, so the
//! structural dedup runs once more at the end. That keeps normalization a
//! fixed point: normalizing an exported canonical table drops nothing.

use std::collections::BTreeSet;
use std::mem;

use tracing::{debug, info, info_span};

use tracelog_model::{
    CATEGORICAL_COLUMNS, CanonicalTable, CellValue, ColumnCapabilities, NormalizeSummary, Record,
};

use crate::cache::content_hash;
use crate::datetime::parse_timestamp;
use crate::decode::decode_input;
use crate::error::Result;
use crate::polars_utils::frame_rows;
use crate::reader::read_frame;

/// A canonical table together with the counts of the pass that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub table: CanonicalTable,
    pub summary: NormalizeSummary,
}

/// Normalize one uploaded file. Pure function of `bytes`.
pub fn normalize(source_name: &str, bytes: &[u8]) -> Result<NormalizedTable> {
    normalize_hashed(source_name, bytes, content_hash(bytes))
}

pub(crate) fn normalize_hashed(
    source_name: &str,
    bytes: &[u8],
    content_hash: String,
) -> Result<NormalizedTable> {
    let span = info_span!("normalize", source = %source_name, bytes = bytes.len());
    let _guard = span.enter();

    let text = decode_input(source_name, bytes)?;
    let frame = read_frame(source_name, text)?;
    let columns: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records: Vec<Record> = frame_rows(&frame).into_iter().map(Record::new).collect();
    let rows_before = records.len();

    let records = dedupe_records(records);
    debug!(rows = records.len(), "dropped exact duplicates");

    let capabilities = ColumnCapabilities::detect(columns.as_slice());
    let mut records = records;
    for record in &mut records {
        canonicalize_record(record, &columns, &capabilities);
    }
    let records = dedupe_records(records);

    let table = CanonicalTable::new(columns, records)?;
    let summary = NormalizeSummary {
        source_name: source_name.to_string(),
        rows_before,
        rows_after: table.len(),
        content_hash,
    };
    info!(
        rows_before = summary.rows_before,
        rows_after = summary.rows_after,
        dropped = summary.dropped(),
        periods = table.periods().len(),
        "Loaded {}: {} -> {} (Dropped {})",
        source_name,
        summary.rows_before,
        summary.rows_after,
        summary.dropped()
    );
    Ok(NormalizedTable { table, summary })
}

/// Keep the first occurrence of each structurally distinct row.
pub fn dedupe_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen = BTreeSet::new();
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.identity()) {
            kept.push(record);
        }
    }
    kept
}

fn canonicalize_record(record: &mut Record, columns: &[String], capabilities: &ColumnCapabilities) {
    for name in CATEGORICAL_COLUMNS {
        let Some(index) = columns.iter().position(|column| column == name) else {
            continue;
        };
        if let Some(cell) = record.cell_mut(index) {
            let value = mem::replace(cell, CellValue::Missing);
            *cell = value.into_categorical();
        }
    }

    let Some(index) = capabilities.timestamp else {
        return;
    };
    let parsed = record.cell(index).and_then(timestamp_of);
    if let (Some(ts), Some(cell)) = (parsed, record.cell_mut(index)) {
        *cell = CellValue::Timestamp(ts);
    }
    record.set_timestamp(parsed);
}

fn timestamp_of(cell: &CellValue) -> Option<chrono::NaiveDateTime> {
    match cell {
        CellValue::Timestamp(ts) => Some(*ts),
        CellValue::Missing => None,
        other => parse_timestamp(&other.to_string()),
    }
}
