//! Dashboard analysis over a canonical inspection log.
//!
//! Everything here reads a [`CanonicalTable`] and never changes it:
//!
//! - [`SelectionState`]: ALL vs. single-month view, as an explicit value
//! - [`filter`]: the active row subset for a selection
//! - [`overall_counts`], [`daily_counts`], [`category_counts`]: group-by-then-count panels
//! - [`failures`]: NG rows for the detail table
//! - [`Session`]: upload, reset and period events plus the render cycle
//!
//! Filtering and aggregation are total over any table, including an empty one.
//!
//! [`CanonicalTable`]: tracelog_model::CanonicalTable

pub mod aggregate;
pub mod failures;
pub mod filter;
pub mod notice;
pub mod selection;
pub mod session;

pub use aggregate::{
    CategoryBreakdown, DailyCount, ResultCounts, Share, category_counts, daily_counts,
    overall_counts,
};
pub use failures::{DisplayCell, FailureTable, HIGHLIGHT_TOKEN, failure_columns, failures};
pub use filter::{ActiveRows, ActiveView, filter};
pub use notice::{Feature, Notice, Severity};
pub use selection::{SelectionState, ViewMode};
pub use session::{DashboardView, OverallSummary, Session};
