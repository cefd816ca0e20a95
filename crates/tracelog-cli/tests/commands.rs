//! Integration tests for the report and periods commands.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use tracelog_analysis::ActiveView;
use tracelog_cli::commands::{ReportOptions, run_periods, run_report};

const LOG: &str = "\
Serial,DateTime,Model,FCT_ID,QRresult,QR3,PCB_Name
S1,2025-01-05 10:00:00,M-100,1,OK,-,P1
S2,2025-01-05 14:00:00,M-100,2,NG,ERROR,P1
S2,2025-01-05 14:00:00,M-100,2,NG,ERROR,P1
S3,2025-02-01 09:00:00,M-200,1,NG,-,P2
";

fn write_log(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("trace.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn report_for_a_month() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, LOG);
    let result = run_report(&ReportOptions {
        input,
        period: Some("2025-01".parse().unwrap()),
        export: None,
    })
    .unwrap();

    assert!(result.period_missing.is_none());
    assert_eq!(result.view.source_name, "trace.csv");
    assert_eq!(result.view.rows_dropped, 1);
    assert_eq!(result.view.row_count, 2);
    let overall = result.view.overall.unwrap();
    assert_eq!((overall.counts.ok(), overall.counts.ng()), (1, 1));
}

#[test]
fn unknown_period_falls_back_to_all() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, LOG);
    let result = run_report(&ReportOptions {
        input,
        period: Some("2024-06".parse().unwrap()),
        export: None,
    })
    .unwrap();

    assert_eq!(result.period_missing, Some("2024-06".parse().unwrap()));
    assert_eq!(result.view.view, ActiveView::All);
    assert_eq!(result.view.row_count, 3);
}

#[test]
fn export_writes_active_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, LOG);
    let export = dir.path().join("feb.csv");
    let result = run_report(&ReportOptions {
        input,
        period: Some("2025-02".parse().unwrap()),
        export: Some(export.clone()),
    })
    .unwrap();

    assert_eq!(result.export.map(|e| e.rows), Some(1));
    let written = fs::read_to_string(&export).unwrap();
    assert_eq!(
        written,
        "Serial,DateTime,Model,FCT_ID,QRresult,QR3,PCB_Name\n\
         S3,2025-02-01 09:00:00,M-200,1,NG,-,P2\n"
    );
}

#[test]
fn periods_are_listed_ascending() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, LOG);
    let listing = run_periods(&input).unwrap();

    let periods: Vec<String> = listing.periods.iter().map(ToString::to_string).collect();
    assert_eq!(periods, vec!["2025-01", "2025-02"]);
    assert_eq!(listing.latest(), Some("2025-02".parse().unwrap()));
    assert_eq!(listing.rows, 3);
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = run_periods(&dir.path().join("absent.csv"));
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("absent.csv"));
}

#[test]
fn empty_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, "");
    assert!(run_report(&ReportOptions {
        input,
        ..ReportOptions::default()
    })
    .is_err());
}
