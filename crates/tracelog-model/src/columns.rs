//! Recognized column names and the capability set detected at load time.

use serde::Serialize;

/// Inspection timestamp.
pub const TIMESTAMP_COLUMN: &str = "DateTime";
/// Pass/fail outcome (`OK` / `NG`).
pub const RESULT_COLUMN: &str = "QRresult";
/// Product model identifier.
pub const MODEL_COLUMN: &str = "Model";
/// Functional test station identifier.
pub const STATION_COLUMN: &str = "FCT_ID";
/// Last column shown in the failure detail table.
pub const DETAIL_BOUNDARY_COLUMN: &str = "QR3";
/// Identifier column left out of the failure detail table.
pub const EXCLUDED_DETAIL_COLUMN: &str = "PCB_Name";

/// Columns trimmed and coerced to text during normalization.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [MODEL_COLUMN, STATION_COLUMN, RESULT_COLUMN];

/// Positions of the recognized columns in a table, computed once per load.
///
/// Downstream code branches on these instead of probing column names again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCapabilities {
    pub timestamp: Option<usize>,
    pub result: Option<usize>,
    pub model: Option<usize>,
    pub station: Option<usize>,
    pub detail_boundary: Option<usize>,
    pub excluded_detail: Option<usize>,
}

impl ColumnCapabilities {
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Self {
        let find = |name: &str| columns.iter().position(|column| column.as_ref() == name);
        Self {
            timestamp: find(TIMESTAMP_COLUMN),
            result: find(RESULT_COLUMN),
            model: find(MODEL_COLUMN),
            station: find(STATION_COLUMN),
            detail_boundary: find(DETAIL_BOUNDARY_COLUMN),
            excluded_detail: find(EXCLUDED_DETAIL_COLUMN),
        }
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}
