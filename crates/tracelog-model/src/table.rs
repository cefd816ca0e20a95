#![deny(unsafe_code)]

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cell::CellValue;
use crate::columns::ColumnCapabilities;
use crate::error::{ModelError, Result};
use crate::outcome::Outcome;
use crate::period::PeriodKey;

/// One inspected unit.
///
/// `period` is always derived from `timestamp`; the two are only set together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    cells: Vec<CellValue>,
    timestamp: Option<NaiveDateTime>,
    period: Option<PeriodKey>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self {
            cells,
            timestamp: None,
            period: None,
        }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut CellValue> {
        self.cells.get_mut(index)
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn period(&self) -> Option<PeriodKey> {
        self.period
    }

    pub fn set_timestamp(&mut self, timestamp: Option<NaiveDateTime>) {
        self.timestamp = timestamp;
        self.period = timestamp.as_ref().map(PeriodKey::from_timestamp);
    }

    /// Structural identity over every cell; equal strings mean equal rows.
    pub fn identity(&self) -> String {
        let mut key = String::new();
        for cell in &self.cells {
            cell.push_identity(&mut key);
        }
        key
    }
}

/// The normalized, deduplicated table built from one upload.
///
/// Immutable once built: analysis reads records through shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    columns: Vec<String>,
    records: Vec<Record>,
    capabilities: ColumnCapabilities,
    periods: Vec<PeriodKey>,
}

impl CanonicalTable {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Result<Self> {
        if let Some(bad) = records.iter().find(|r| r.cells.len() != columns.len()) {
            return Err(ModelError::RowWidth {
                expected: columns.len(),
                actual: bad.cells.len(),
            });
        }
        let capabilities = ColumnCapabilities::detect(columns.as_slice());
        let periods: BTreeSet<PeriodKey> = records.iter().filter_map(Record::period).collect();
        Ok(Self {
            columns,
            records,
            capabilities,
            periods: periods.into_iter().collect(),
        })
    }


    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capabilities(&self) -> &ColumnCapabilities {
        &self.capabilities
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value<'a>(&self, record: &'a Record, column: &str) -> Option<&'a CellValue> {
        record.cell(self.column_index(column)?)
    }

    /// Distinct periods present among parseable timestamps, ascending.
    pub fn periods(&self) -> &[PeriodKey] {
        &self.periods
    }

    pub fn latest_period(&self) -> Option<PeriodKey> {
        self.periods.last().copied()
    }

    pub fn has_period(&self, period: &PeriodKey) -> bool {
        self.periods.binary_search(period).is_ok()
    }

    /// Result text of a record, when the result column exists.
    pub fn result_label<'a>(&self, record: &'a Record) -> Option<&'a str> {
        let cell = record.cell(self.capabilities.result?)?;
        Some(cell.as_text().unwrap_or_default())
    }

    pub fn outcome(&self, record: &Record) -> Option<Outcome> {
        self.result_label(record).map(Outcome::classify)
    }
}
