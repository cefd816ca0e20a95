//! End-to-end render cycles and aggregation properties.

use proptest::prelude::*;

use tracelog_analysis::{
    ActiveRows, ActiveView, Notice, SelectionState, Session, category_counts, daily_counts,
    failures, filter, overall_counts,
};
use tracelog_ingest::{CacheStatus, normalize};
use tracelog_model::{CanonicalTable, PeriodKey};

const SCENARIO: &str = "\
Serial,PCB_Name,DateTime,Model,FCT_ID,QRresult,QR1,QR3,Operator
S1,P1,2025-01-05 10:00:00,M-100,1,OK,-,-,kim
S2,P1,2025-01-05 14:00:00,M-100,2,NG,ERROR 31,-,kim
S3,P2,2025-02-01 09:00:00,M-200,1,NG,-,ERROR 07,lee
";

fn p(text: &str) -> PeriodKey {
    text.parse().unwrap()
}

fn scenario_session() -> Session {
    let mut session = Session::new();
    session.upload("trace.csv", SCENARIO.as_bytes()).unwrap();
    session
}

#[test]
fn january_selection_scenario() {
    let mut session = scenario_session();
    assert!(session.select_period(p("2025-01")));
    let view = session.render().unwrap();

    assert_eq!(view.view, ActiveView::Month(p("2025-01")));
    assert_eq!(view.row_count, 2);

    let overall = view.overall.as_ref().unwrap();
    assert_eq!(overall.counts.ok(), 1);
    assert_eq!(overall.counts.ng(), 1);
    assert_eq!(overall.counts.len(), 2);

    let daily = view.daily.as_ref().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].date.to_string(), "2025-01-05");
    assert_eq!((daily[0].ok, daily[0].ng), (1, 1));

    let labels: Vec<String> = overall.shares.iter().map(|s| s.display_label()).collect();
    assert_eq!(labels, vec!["50.0% (1)", "50.0% (1)"]);

    insta::assert_json_snapshot!(view.daily, @r#"
    [
      {
        "date": "2025-01-05",
        "ok": 1,
        "ng": 1,
        "other": 0
      }
    ]
    "#);
}

#[test]
fn failure_table_spans_to_boundary_without_identifier() {
    let session = scenario_session();
    let view = session.render().unwrap();
    let table = view.failures.unwrap();

    assert_eq!(
        table.columns,
        vec!["Serial", "DateTime", "Model", "FCT_ID", "QRresult", "QR1", "QR3"]
    );
    assert_eq!(table.len(), 2);
    // February row is newer
    assert_eq!(table.rows[0][0].text, "S3");
    assert!(table.rows[0][6].highlight);
    assert!(table.rows[1][5].highlight);
    assert!(!table.rows[1][6].highlight);
}

#[test]
fn reset_returns_to_all_rows() {
    let mut session = scenario_session();
    session.select_period(p("2025-02"));
    assert_eq!(session.render().unwrap().row_count, 1);

    session.reset_to_all();
    let view = session.render().unwrap();
    assert_eq!(view.view, ActiveView::All);
    assert_eq!(view.row_count, 3);
    assert_eq!(view.view_label, "All periods");
}

#[test]
fn repeated_upload_hits_the_cache() {
    let mut session = Session::new();
    let first = session.upload("trace.csv", SCENARIO.as_bytes()).unwrap();
    let table = session.table().unwrap().clone();
    let second = session.upload("trace.csv", SCENARIO.as_bytes()).unwrap();

    assert_eq!(first, CacheStatus::Miss);
    assert_eq!(second, CacheStatus::Hit);
    assert_eq!(session.table().unwrap(), &table);
    assert_eq!(session.cache().misses(), 1);
}

#[test]
fn month_without_ng_rows_reports_no_failures() {
    let input = "DateTime,QRresult\n2025-01-05 10:00:00,OK\n2025-02-05 10:00:00,NG\n";
    let mut session = Session::new();
    session.upload("trace.csv", input.as_bytes()).unwrap();
    session.select_period(p("2025-01"));
    let view = session.render().unwrap();

    assert!(view.failures.as_ref().is_some_and(|f| f.is_empty()));
    assert!(view.notices.contains(&Notice::NoFailures));
}

#[test]
fn dashboard_serializes_selection_and_view() {
    let mut session = scenario_session();
    session.select_period(p("2025-02"));
    let json = serde_json::to_value(session.render().unwrap()).unwrap();

    assert_eq!(json["selection"]["mode"], "MONTH");
    assert_eq!(json["selection"]["selected_period"], "2025-02");
    assert_eq!(json["view"]["period"], "2025-02");
    assert_eq!(json["available_periods"], serde_json::json!(["2025-01", "2025-02"]));
    assert_eq!(json["overall"]["shares"][0]["label"], "NG");
    assert_eq!(json["by_model"][0]["value"], "M-200");
    assert_eq!(json["by_model"][0]["shares"][0]["label"], "NG");
    assert_eq!(json["by_model"][0]["shares"][0]["count"], 1);
}

fn row_strategy() -> impl Strategy<Value = (u32, u32, &'static str, &'static str, bool)> {
    (
        1u32..=4,
        1u32..=28,
        prop::sample::select(vec!["OK", "NG", "RETRY"]),
        prop::sample::select(vec!["M-100", "M-200", "M-300"]),
        any::<bool>(),
    )
}

fn table_from_rows(rows: &[(u32, u32, &str, &str, bool)]) -> CanonicalTable {
    let mut text = String::from("Serial,DateTime,Model,QRresult\n");
    for (index, (month, day, result, model, timed)) in rows.iter().enumerate() {
        let stamp = if *timed {
            format!("2025-{month:02}-{day:02} 08:00:00")
        } else {
            "unknown".to_string()
        };
        text.push_str(&format!("{index},{stamp},{model},{result}\n"));
    }
    normalize("p.csv", text.as_bytes()).unwrap().table
}

proptest! {
    #[test]
    fn overall_counts_sum_to_subset_size(
        rows in prop::collection::vec(row_strategy(), 0..60),
        month in 1u32..=5,
    ) {
        let table = table_from_rows(&rows);
        let state = PeriodKey::new(2025, month)
            .map(|period| SelectionState::new().select_period(period, table.periods()))
            .unwrap_or_default();
        let subset = filter(&table, &state);
        prop_assert_eq!(overall_counts(&subset).total(), subset.len());
    }

    #[test]
    fn daily_entries_are_complete_and_ascending(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let table = table_from_rows(&rows);
        let daily = daily_counts(&ActiveRows::all(&table));
        for pair in daily.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
        for day in &daily {
            prop_assert!(day.total() > 0);
        }
        let timed = table.records().iter().filter(|r| r.timestamp().is_some()).count();
        prop_assert_eq!(daily.iter().map(|d| d.total()).sum::<usize>(), timed);
    }

    #[test]
    fn categories_are_never_empty(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let table = table_from_rows(&rows);
        let groups = category_counts(&ActiveRows::all(&table), "Model");
        for pair in groups.windows(2) {
            prop_assert!(pair[0].value < pair[1].value);
        }
        for group in &groups {
            prop_assert!(group.total() > 0);
        }
    }

    #[test]
    fn unknown_period_filters_like_all(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let table = table_from_rows(&rows);
        let stale_period = p("2031-07");
        let stale = SelectionState::new().select_period(stale_period, &[stale_period]);
        let all = filter(&table, &SelectionState::new());
        let fallback = filter(&table, &stale);
        prop_assert_eq!(fallback.view(), ActiveView::All);
        prop_assert_eq!(fallback.records(), all.records());
    }

    #[test]
    fn failures_only_ng_rows(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let table = table_from_rows(&rows);
        let subset = ActiveRows::all(&table);
        let ng = overall_counts(&subset).ng();
        let failing = failures(&subset).expect("result column present");
        prop_assert_eq!(failing.len(), ng);
    }
}
