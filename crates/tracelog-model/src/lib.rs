//! Data model for inspection trace logs.
//!
//! The types here describe the canonical, normalized form of an uploaded
//! inspection log. Ingestion produces a [`CanonicalTable`]; analysis and
//! presentation only ever read it.
//!
//! # Overview
//!
//! - [`CellValue`]: one typed cell (text, number, timestamp, missing)
//! - [`Record`]: one inspected unit, with its parsed timestamp and derived [`PeriodKey`]
//! - [`CanonicalTable`]: ordered records plus the [`ColumnCapabilities`] detected once at load
//! - [`Outcome`]: the OK / NG / other classification of a result value

pub mod cell;
pub mod columns;
pub mod error;
pub mod outcome;
pub mod period;
pub mod summary;
pub mod table;

pub use cell::{CellValue, TIMESTAMP_DISPLAY_FORMAT};
pub use columns::{
    CATEGORICAL_COLUMNS, ColumnCapabilities, DETAIL_BOUNDARY_COLUMN, EXCLUDED_DETAIL_COLUMN,
    MODEL_COLUMN, RESULT_COLUMN, STATION_COLUMN, TIMESTAMP_COLUMN,
};
pub use error::{ModelError, Result};
pub use outcome::{NG_LABEL, OK_LABEL, Outcome};
pub use period::PeriodKey;
pub use summary::NormalizeSummary;
pub use table::{CanonicalTable, Record};
