use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tracelog_analysis::{
    CategoryBreakdown, DailyCount, DashboardView, DisplayCell, FailureTable, Notice,
    OverallSummary, Severity,
};
use tracelog_model::{NG_LABEL, OK_LABEL};

use crate::commands::{PeriodListing, ReportResult};

pub fn print_report(result: &ReportResult, max_failures: usize) {
    if let Some(period) = result.period_missing {
        eprintln!("warning: period {period} not found in log, showing all periods");
    }
    print!("{}", render_report(&result.view, max_failures));
    if let Some(export) = &result.export {
        println!();
        println!("Exported {} rows to {}", export.rows, export.path.display());
    }
}

pub fn print_json(result: &ReportResult) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&result.view)?);
    Ok(())
}

/// The whole dashboard as text, one panel after another.
pub fn render_report(view: &DashboardView, max_failures: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source: {}\n", view.source_name));
    out.push_str(&format!(
        "Rows: {} loaded ({} duplicates dropped)\n",
        view.rows_loaded, view.rows_dropped
    ));
    out.push_str(&format!(
        "View: {} ({} rows)\n",
        view.view_label, view.row_count
    ));
    if !view.available_periods.is_empty() {
        let periods: Vec<String> = view
            .available_periods
            .iter()
            .map(ToString::to_string)
            .collect();
        out.push_str(&format!("Periods: {}\n", periods.join(", ")));
    }
    for notice in &view.notices {
        out.push_str(&notice_line(notice));
        out.push('\n');
    }

    if let Some(overall) = &view.overall {
        push_panel(&mut out, "Result summary", &overall_table(overall));
    }
    if let Some(daily) = &view.daily
        && !daily.is_empty()
    {
        push_panel(&mut out, "Daily trend", &daily_table(daily));
    }
    if let Some(groups) = &view.by_model {
        push_panel(&mut out, "By model", &breakdown_table("Model", groups));
    }
    if let Some(groups) = &view.by_station {
        push_panel(&mut out, "By station", &breakdown_table("Station", groups));
    }
    if let Some(failures) = &view.failures
        && !failures.is_empty()
    {
        let (table, hidden) = failure_table(failures, max_failures);
        push_panel(&mut out, &format!("NG rows ({})", failures.len()), &table);
        if hidden > 0 {
            out.push_str(&format!(
                "... {hidden} more NG rows not shown (raise --max-failures)\n"
            ));
        }
    }
    out
}

pub fn print_periods(listing: &PeriodListing) {
    println!("Source: {} ({} rows)", listing.source_name, listing.rows);
    if listing.periods.is_empty() {
        println!("note: no parseable timestamps, only the all-periods view is available");
        return;
    }
    let latest = listing.latest();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Period"), header_cell("")]);
    apply_table_style(&mut table);
    for period in &listing.periods {
        let marker = if Some(*period) == latest {
            Cell::new("latest").fg(Color::Green)
        } else {
            dim_cell("")
        };
        table.add_row(vec![Cell::new(period), marker]);
    }
    println!("{table}");
}

fn notice_line(notice: &Notice) -> String {
    match notice.severity() {
        Severity::Warning => format!("warning: {notice}"),
        Severity::Info => format!("note: {notice}"),
    }
}

fn push_panel(out: &mut String, title: &str, table: &Table) {
    out.push_str(&format!("\n{title}:\n{table}\n"));
}

/// Result rows with OK and NG always listed, then TOTAL.
fn overall_table(overall: &OverallSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Result"),
        header_cell("Count"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for share in overall.counts.with_primary_outcomes().shares() {
        table.add_row(vec![
            result_cell(&share.label),
            Cell::new(share.count),
            Cell::new(format!("{:.1}%", share.percent)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(overall.total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn daily_table(daily: &[DailyCount]) -> Table {
    let show_other = daily.iter().any(|day| day.other > 0);
    let mut header = vec![
        header_cell("Date"),
        header_cell(OK_LABEL),
        header_cell(NG_LABEL),
    ];
    if show_other {
        header.push(header_cell("Other"));
    }
    let mut table = Table::new();
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for day in daily {
        let mut row = vec![
            Cell::new(day.date.format("%y/%m/%d")),
            Cell::new(day.ok),
            count_cell(day.ng, Color::Red),
        ];
        if show_other {
            row.push(count_cell(day.other, Color::Yellow));
        }
        table.add_row(row);
    }
    table
}

fn breakdown_table(label: &str, groups: &[CategoryBreakdown]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(label),
        header_cell(OK_LABEL),
        header_cell(NG_LABEL),
        header_cell("Other"),
        header_cell("Total"),
        header_cell("NG rate"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in groups {
        let total = group.total();
        let other = total - group.counts.ok() - group.counts.ng();
        let value = if group.value.is_empty() {
            dim_cell("(blank)")
        } else {
            Cell::new(&group.value).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            value,
            Cell::new(group.counts.ok()),
            count_cell(group.counts.ng(), Color::Red),
            count_cell(other, Color::Yellow),
            Cell::new(total),
            Cell::new(format!("{:.1}%", ng_rate(group.counts.ng(), total))),
        ]);
    }
    table
}

fn failure_table(failures: &FailureTable, max_rows: usize) -> (Table, usize) {
    let mut table = Table::new();
    table.set_header(
        failures
            .columns
            .iter()
            .map(|column| header_cell(column))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let (rows, hidden) = failures.head(max_rows);
    for row in rows {
        table.add_row(row.iter().map(failure_cell).collect::<Vec<_>>());
    }
    (table, hidden)
}

fn failure_cell(cell: &DisplayCell) -> Cell {
    if cell.highlight {
        Cell::new(&cell.text)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&cell.text)
    }
}

fn ng_rate(ng: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        ng as f64 * 100.0 / total as f64
    }
}

fn result_cell(label: &str) -> Cell {
    match label {
        OK_LABEL => Cell::new(label)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        NG_LABEL => Cell::new(label)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        _ => Cell::new(label).fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelog_analysis::Session;

    const LOG: &str = "\
Serial,DateTime,Model,FCT_ID,QRresult,QR1,QR3
S1,2025-01-05 10:00:00,M-100,1,OK,-,-
S2,2025-01-05 14:00:00,M-100,2,NG,ERROR 31,-
S3,2025-02-01 09:00:00,M-200,1,NG,-,ERROR 07
";

    fn view() -> DashboardView {
        let mut session = Session::new();
        session.upload("trace.csv", LOG.as_bytes()).unwrap();
        session.render().unwrap()
    }

    #[test]
    fn report_lists_every_panel() {
        let text = render_report(&view(), 50);
        assert!(text.contains("View: All periods (3 rows)"));
        assert!(text.contains("Periods: 2025-01, 2025-02"));
        for title in ["Result summary:", "Daily trend:", "By model:", "By station:", "NG rows (2):"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("25/01/05"));
        assert!(text.contains("66.7%"));
    }

    #[test]
    fn failure_rows_are_truncated_with_note() {
        let text = render_report(&view(), 1);
        assert!(text.contains("... 1 more NG rows not shown"));
        assert!(text.contains("ERROR 07"));
        assert!(!text.contains("ERROR 31"));
    }

    #[test]
    fn overall_table_lists_absent_ng_as_zero() {
        let mut session = Session::new();
        session
            .upload("ok.csv", b"DateTime,QRresult\n2025-01-05 10:00:00,OK\n")
            .unwrap();
        let view = session.render().unwrap();
        let table = overall_table(view.overall.as_ref().unwrap());

        let rows: Vec<Vec<String>> = table
            .row_iter()
            .map(|row| row.cell_iter().map(Cell::content).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["OK", "1", "100.0%"],
                vec!["NG", "0", "0.0%"],
                vec!["TOTAL", "1", "-"],
            ]
        );
    }

    #[test]
    fn notices_are_prefixed_by_severity() {
        assert_eq!(
            notice_line(&Notice::EmptySelection),
            "note: no data for the selected period"
        );
        assert!(notice_line(&Notice::NoPeriods).starts_with("warning: "));
    }

    #[test]
    fn ng_rate_handles_empty_group() {
        assert!((ng_rate(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((ng_rate(1, 4) - 25.0).abs() < f64::EPSILON);
    }
}
