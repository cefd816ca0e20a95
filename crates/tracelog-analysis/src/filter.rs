//! Resolving the active subset of rows for a selection.

use serde::Serialize;
use tracing::debug;

use tracelog_model::{CanonicalTable, PeriodKey, Record};

use crate::selection::SelectionState;

/// The view actually in effect after validating the selection against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "period", rename_all = "UPPERCASE")]
pub enum ActiveView {
    All,
    Month(PeriodKey),
}

impl ActiveView {
    /// A month view only holds when the table actually has that period.
    pub fn resolve(table: &CanonicalTable, state: &SelectionState) -> Self {
        match state.month() {
            Some(period) if table.has_period(&period) => Self::Month(period),
            _ => Self::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All periods".to_string(),
            Self::Month(period) => format!("Period: {period}"),
        }
    }
}

/// Rows of the canonical table visible under the active view.
///
/// Holds shared references only; the canonical table cannot be changed
/// through a subset.
#[derive(Debug, Clone)]
pub struct ActiveRows<'a> {
    table: &'a CanonicalTable,
    view: ActiveView,
    records: Vec<&'a Record>,
}

impl<'a> ActiveRows<'a> {
    /// Every row of the table.
    pub fn all(table: &'a CanonicalTable) -> Self {
        Self {
            table,
            view: ActiveView::All,
            records: table.records().iter().collect(),
        }
    }

    pub fn table(&self) -> &'a CanonicalTable {
        self.table
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply the selection to the table, preserving row order.
///
/// An unknown period, or a table without any period keys, resolves to the
/// whole table.
pub fn filter<'a>(table: &'a CanonicalTable, state: &SelectionState) -> ActiveRows<'a> {
    let view = ActiveView::resolve(table, state);
    let rows = match view {
        ActiveView::All => ActiveRows::all(table),
        ActiveView::Month(period) => ActiveRows {
            table,
            view,
            records: table
                .records()
                .iter()
                .filter(|record| record.period() == Some(period))
                .collect(),
        },
    };
    debug!(view = %view.label(), rows = rows.len(), "filtered active rows");
    rows
}
