//! One dashboard session: the loaded table, its cache, and the selection.
//!
//! Events (upload, reset, period change) run to completion one at a time.
//! A failed upload leaves the previously loaded table and the selection as
//! they were.

use serde::Serialize;
use tracing::{info, info_span, warn};

use tracelog_ingest::{CacheStatus, LoadError, NormalizedTable, TableCache};
use tracelog_model::{
    CanonicalTable, MODEL_COLUMN, NormalizeSummary, PeriodKey, RESULT_COLUMN, STATION_COLUMN,
    TIMESTAMP_COLUMN,
};

use crate::aggregate::{
    CategoryBreakdown, DailyCount, ResultCounts, Share, category_counts, daily_counts,
    overall_counts,
};
use crate::failures::{FailureTable, failures};
use crate::filter::{ActiveView, filter};
use crate::notice::{Feature, Notice};
use crate::selection::SelectionState;

#[derive(Debug, Default)]
pub struct Session {
    cache: TableCache,
    selection: SelectionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an upload, reusing the cached table when the bytes are unchanged.
    ///
    /// A different file starts from a fresh selection; the same file keeps
    /// the current one. Either way the selection is reconciled with the
    /// table's periods.
    pub fn upload(&mut self, source_name: &str, bytes: &[u8]) -> Result<CacheStatus, LoadError> {
        let _span = info_span!("upload", source = source_name).entered();
        let previous = self.cache.current_hash().map(str::to_owned);
        let load = self.cache.load(source_name, bytes)?;

        let same_file = previous.as_deref() == Some(load.table.summary.content_hash.as_str());
        let base = if same_file {
            self.selection
        } else {
            SelectionState::default()
        };
        self.selection = base.reconcile(load.table.table.periods());
        info!(
            status = ?load.status,
            periods = load.table.table.periods().len(),
            "upload ready"
        );
        Ok(load.status)
    }

    pub fn reset_to_all(&mut self) {
        self.selection = self.selection.reset_to_all();
    }

    /// Switch to a month view. Returns `false` when no table is loaded or
    /// the period is not in it.
    pub fn select_period(&mut self, period: PeriodKey) -> bool {
        let Some(loaded) = self.cache.current() else {
            return false;
        };
        self.selection = self.selection.select_period(period, loaded.table.periods());
        loaded.table.has_period(&period)
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn loaded(&self) -> Option<&NormalizedTable> {
        self.cache.current().map(|loaded| &**loaded)
    }

    pub fn table(&self) -> Option<&CanonicalTable> {
        self.loaded().map(|loaded| &loaded.table)
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Everything the presentation layer needs for one render.
    pub fn render(&self) -> Option<DashboardView> {
        let loaded = self.loaded()?;
        Some(DashboardView::build(
            &loaded.table,
            &loaded.summary,
            self.selection,
        ))
    }
}

/// Result counts for the active view with their chart segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub counts: ResultCounts,
    pub shares: Vec<Share>,
    pub total: usize,
}

impl OverallSummary {
    fn from_counts(counts: ResultCounts) -> Self {
        Self {
            shares: counts.shares(),
            total: counts.total(),
            counts,
        }
    }
}

/// One render cycle's output.
///
/// Panels are `None` when skipped, either because their column is absent
/// (see `notices`) or because the active view is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub source_name: String,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub available_periods: Vec<PeriodKey>,
    pub selection: SelectionState,
    pub view: ActiveView,
    pub view_label: String,
    pub row_count: usize,
    pub notices: Vec<Notice>,
    pub overall: Option<OverallSummary>,
    pub daily: Option<Vec<DailyCount>>,
    pub by_model: Option<Vec<CategoryBreakdown>>,
    pub by_station: Option<Vec<CategoryBreakdown>>,
    pub failures: Option<FailureTable>,
}

impl DashboardView {
    pub fn build(
        table: &CanonicalTable,
        summary: &NormalizeSummary,
        selection: SelectionState,
    ) -> Self {
        let caps = table.capabilities();
        let rows = filter(table, &selection);
        let mut notices = Vec::new();

        if !caps.has_timestamp() {
            notices.push(schema_warning(TIMESTAMP_COLUMN, Feature::PeriodSelection));
            notices.push(schema_warning(TIMESTAMP_COLUMN, Feature::DailyTrend));
        } else if table.periods().is_empty() && !table.is_empty() {
            warn!("timestamp column present but no value parsed");
            notices.push(Notice::NoPeriods);
        }

        let mut view = Self {
            source_name: summary.source_name.clone(),
            rows_loaded: table.len(),
            rows_dropped: summary.dropped(),
            available_periods: table.periods().to_vec(),
            selection,
            view: rows.view(),
            view_label: rows.view().label(),
            row_count: rows.len(),
            notices,
            overall: None,
            daily: None,
            by_model: None,
            by_station: None,
            failures: None,
        };

        if rows.is_empty() {
            view.notices.push(Notice::EmptySelection);
            return view;
        }
        if !caps.has_result() {
            view.notices.push(schema_warning(RESULT_COLUMN, Feature::Summary));
            return view;
        }

        view.overall = Some(OverallSummary::from_counts(overall_counts(&rows)));
        if caps.has_timestamp() {
            view.daily = Some(daily_counts(&rows));
        }
        match caps.model {
            Some(_) => view.by_model = Some(category_counts(&rows, MODEL_COLUMN)),
            None => view
                .notices
                .push(schema_warning(MODEL_COLUMN, Feature::ModelBreakdown)),
        }
        match caps.station {
            Some(_) => view.by_station = Some(category_counts(&rows, STATION_COLUMN)),
            None => view
                .notices
                .push(schema_warning(STATION_COLUMN, Feature::StationBreakdown)),
        }
        view.failures = failures(&rows);
        if view.failures.as_ref().is_some_and(FailureTable::is_empty) {
            view.notices.push(Notice::NoFailures);
        }
        view
    }
}

fn schema_warning(column: &str, feature: Feature) -> Notice {
    warn!(column, feature = feature.name(), "recognized column missing");
    Notice::missing_column(column, feature)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
DateTime,Model,FCT_ID,QRresult,QR3
2025-01-05 10:00:00,M-100,1,OK,-
2025-01-05 11:00:00,M-100,2,NG,ERROR
2025-02-01 09:00:00,M-200,1,NG,ERROR
";

    fn p(text: &str) -> PeriodKey {
        text.parse().unwrap()
    }

    #[test]
    fn nothing_loaded_renders_nothing() {
        let mut session = Session::new();
        assert!(session.render().is_none());
        assert!(!session.select_period(p("2025-01")));
    }

    #[test]
    fn fresh_upload_points_selector_at_latest_period() {
        let mut session = Session::new();
        assert_eq!(session.upload("a.csv", LOG.as_bytes()).unwrap(), CacheStatus::Miss);
        assert_eq!(session.selection().selected_period(), Some(p("2025-02")));
        assert_eq!(session.selection().month(), None);
    }

    #[test]
    fn reupload_keeps_selection() {
        let mut session = Session::new();
        session.upload("a.csv", LOG.as_bytes()).unwrap();
        assert!(session.select_period(p("2025-01")));
        let status = session.upload("a.csv", LOG.as_bytes()).unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(session.selection().month(), Some(p("2025-01")));
    }

    #[test]
    fn new_file_resets_selection() {
        let mut session = Session::new();
        session.upload("a.csv", LOG.as_bytes()).unwrap();
        session.select_period(p("2025-01"));
        let other = "DateTime,QRresult\n2025-03-02 08:00:00,OK\n";
        session.upload("b.csv", other.as_bytes()).unwrap();
        assert_eq!(session.selection().month(), None);
        assert_eq!(session.selection().selected_period(), Some(p("2025-03")));
    }

    #[test]
    fn failed_upload_keeps_previous_state() {
        let mut session = Session::new();
        session.upload("a.csv", LOG.as_bytes()).unwrap();
        session.select_period(p("2025-01"));
        let before = session.render().unwrap();

        assert!(session.upload("bad.csv", b"").is_err());
        assert_eq!(session.selection().month(), Some(p("2025-01")));
        assert_eq!(session.render().unwrap(), before);
    }

    #[test]
    fn missing_result_column_skips_panels() {
        let mut session = Session::new();
        session
            .upload("a.csv", b"DateTime,Model\n2025-01-05 10:00:00,M-100\n")
            .unwrap();
        let view = session.render().unwrap();
        assert!(view.overall.is_none());
        assert!(view.failures.is_none());
        assert_eq!(view.available_periods, vec![p("2025-01")]);
        assert!(
            view.notices
                .contains(&Notice::missing_column("QRresult", Feature::Summary))
        );
    }

    #[test]
    fn missing_station_column_skips_only_that_breakdown() {
        let mut session = Session::new();
        session
            .upload("a.csv", b"DateTime,Model,QRresult\n2025-01-05 10:00:00,M-100,OK\n")
            .unwrap();
        let view = session.render().unwrap();
        assert!(view.by_model.is_some());
        assert!(view.by_station.is_none());
        assert!(view.overall.is_some());
        assert!(view.notices.contains(&Notice::NoFailures));
        assert!(
            view.notices
                .contains(&Notice::missing_column("FCT_ID", Feature::StationBreakdown))
        );
    }

    #[test]
    fn missing_timestamp_column_disables_periods_and_trend() {
        let mut session = Session::new();
        session.upload("a.csv", b"Model,QRresult\nA,OK\n").unwrap();
        let view = session.render().unwrap();
        for feature in [Feature::PeriodSelection, Feature::DailyTrend] {
            assert!(
                view.notices
                    .contains(&Notice::missing_column("DateTime", feature)),
                "missing {feature:?} warning"
            );
        }
        assert!(view.available_periods.is_empty());
        assert!(view.daily.is_none());
        assert_eq!(view.view, ActiveView::All);
        let overall = view.overall.expect("summary still rendered");
        assert_eq!(overall.counts.ok(), 1);
        assert!(view.by_model.is_some());
    }

    #[test]
    fn unparseable_timestamps_report_no_periods() {
        let mut session = Session::new();
        session
            .upload("a.csv", b"DateTime,QRresult\nyesterday,OK\nsoon,NG\n")
            .unwrap();
        let view = session.render().unwrap();
        assert!(view.notices.contains(&Notice::NoPeriods));
        assert_eq!(view.view, ActiveView::All);
        assert_eq!(view.row_count, 2);
        assert_eq!(view.daily, Some(Vec::new()));
    }

    #[test]
    fn header_only_upload_is_an_empty_selection() {
        let mut session = Session::new();
        session.upload("a.csv", b"DateTime,QRresult\n").unwrap();
        let view = session.render().unwrap();
        assert_eq!(view.notices, vec![Notice::EmptySelection]);
        assert!(view.overall.is_none());
    }
}
