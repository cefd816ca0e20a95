//! View selection: all periods, or a single calendar month.
//!
//! The state is a plain value. Each user action takes the current state and
//! returns the next one, so transitions can be exercised without a session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tracelog_model::PeriodKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewMode {
    #[default]
    All,
    Month,
}

/// Current view mode plus the period the selector points at.
///
/// `selected_period` is kept while in `All` mode so the period control
/// remembers its position across a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    mode: ViewMode,
    selected_period: Option<PeriodKey>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected_period(&self) -> Option<PeriodKey> {
        self.selected_period
    }

    /// The month being viewed, if any.
    pub fn month(&self) -> Option<PeriodKey> {
        match self.mode {
            ViewMode::Month => self.selected_period,
            ViewMode::All => None,
        }
    }

    /// Explicit reset: back to the all-periods view.
    #[must_use]
    pub fn reset_to_all(self) -> Self {
        debug!(from = ?self.mode, "selection reset to all periods");
        Self {
            mode: ViewMode::All,
            ..self
        }
    }

    /// Switch to a single month. Ignored when `period` is not available.
    #[must_use]
    pub fn select_period(self, period: PeriodKey, available: &[PeriodKey]) -> Self {
        if !available.contains(&period) {
            debug!(%period, "ignoring selection of unavailable period");
            return self;
        }
        debug!(%period, "selection switched to month view");
        Self {
            mode: ViewMode::Month,
            selected_period: Some(period),
        }
    }

    /// Re-validate against the periods of a (re)loaded table.
    ///
    /// A selected period that no longer exists moves to the latest one; with
    /// no periods at all the view falls back to `All`.
    #[must_use]
    pub fn reconcile(self, available: &[PeriodKey]) -> Self {
        let Some(latest) = available.iter().max().copied() else {
            return Self::default();
        };
        match self.selected_period {
            Some(period) if available.contains(&period) => self,
            _ => Self {
                mode: self.mode,
                selected_period: Some(latest),
            },
        }
    }
}
