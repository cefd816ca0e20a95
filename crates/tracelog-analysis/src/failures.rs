//! The failure detail table: NG rows, newest first, over a bounded column span.

use std::cmp::Ordering;

use serde::Serialize;

use tracelog_model::{CanonicalTable, CellValue, Record};

use crate::filter::ActiveRows;

/// Substring that marks a failing cell.
pub const HIGHLIGHT_TOKEN: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCell {
    pub text: String,
    pub highlight: bool,
}

impl DisplayCell {
    fn from_cell(cell: &CellValue) -> Self {
        let highlight = cell
            .as_text()
            .is_some_and(|text| text.contains(HIGHLIGHT_TOKEN));
        Self {
            text: cell.to_string(),
            highlight,
        }
    }
}

/// Display-ready copy of the failing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<DisplayCell>>,
}

impl FailureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `limit` rows and the number left out.
    pub fn head(&self, limit: usize) -> (&[Vec<DisplayCell>], usize) {
        let shown = self.rows.len().min(limit);
        (&self.rows[..shown], self.rows.len() - shown)
    }
}

/// Column positions shown in the failure table.
///
/// Everything up to and including the detail boundary column; without it,
/// everything before the result column. The excluded identifier column is
/// dropped from either span. `None` when neither anchor column exists.
pub fn failure_columns(table: &CanonicalTable) -> Option<Vec<usize>> {
    let caps = table.capabilities();
    let span = match (caps.detail_boundary, caps.result) {
        (Some(boundary), _) => 0..boundary + 1,
        (None, Some(result)) => 0..result,
        (None, None) => return None,
    };
    Some(
        span.filter(|index| Some(*index) != caps.excluded_detail)
            .collect(),
    )
}

/// Newest first; rows without a timestamp go last in their original order.
fn newest_first(a: &&Record, b: &&Record) -> Ordering {
    match (a.timestamp(), b.timestamp()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Build the failure table for the active rows.
///
/// Returns `None` when the table has no result column (nothing can be
/// classified as a failure). An empty failure set is an empty table, not
/// an error.
pub fn failures(rows: &ActiveRows<'_>) -> Option<FailureTable> {
    let table = rows.table();
    table.capabilities().result?;
    let columns = failure_columns(table)?;

    let mut failing: Vec<&Record> = rows
        .iter()
        .filter(|record| table.outcome(record).is_some_and(|o| o.is_failure()))
        .collect();
    failing.sort_by(newest_first);

    let rows = failing
        .into_iter()
        .map(|record| {
            columns
                .iter()
                .map(|index| {
                    let cell = record.cell(*index).unwrap_or(&CellValue::Missing);
                    DisplayCell::from_cell(cell)
                })
                .collect()
        })
        .collect();

    Some(FailureTable {
        columns: columns
            .iter()
            .map(|index| table.columns()[*index].clone())
            .collect(),
        rows,
    })
}
