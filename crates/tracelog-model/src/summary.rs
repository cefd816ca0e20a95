use serde::{Deserialize, Serialize};

/// Row counts reported by a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeSummary {
    pub source_name: String,
    /// Rows parsed from the input.
    pub rows_before: usize,
    /// Rows left after deduplication.
    pub rows_after: usize,
    /// SHA-256 of the uploaded bytes (hex).
    pub content_hash: String,
}

impl NormalizeSummary {
    pub fn dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}
