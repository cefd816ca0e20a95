use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use tracelog_analysis::{DashboardView, Session, filter};
use tracelog_ingest::{read_upload, write_records};
use tracelog_model::PeriodKey;

/// Inputs for one `report` run.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub period: Option<PeriodKey>,
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct ReportResult {
    pub view: DashboardView,
    /// The requested period was not in the log and the view fell back to all periods.
    pub period_missing: Option<PeriodKey>,
    pub export: Option<ExportSummary>,
}

#[derive(Debug, Clone)]
pub struct PeriodListing {
    pub source_name: String,
    pub periods: Vec<PeriodKey>,
    pub rows: usize,
}

impl PeriodListing {
    pub fn latest(&self) -> Option<PeriodKey> {
        self.periods.last().copied()
    }
}

fn load_session(input: &Path) -> Result<Session> {
    let upload = read_upload(input).with_context(|| format!("read {}", input.display()))?;
    let mut session = Session::new();
    session
        .upload(&upload.name, &upload.bytes)
        .with_context(|| format!("load {}", upload.name))?;
    Ok(session)
}

pub fn run_report(options: &ReportOptions) -> Result<ReportResult> {
    let span = info_span!("report", input = %options.input.display());
    let _guard = span.enter();

    let mut session = load_session(&options.input)?;
    let mut period_missing = None;
    if let Some(period) = options.period
        && !session.select_period(period)
    {
        warn!(%period, "period not present in log, showing all periods");
        period_missing = Some(period);
    }

    let export = match &options.export {
        Some(path) => Some(export_active_rows(&session, path)?),
        None => None,
    };
    let view = session
        .render()
        .context("no table loaded after upload")?;
    Ok(ReportResult {
        view,
        period_missing,
        export,
    })
}

fn export_active_rows(session: &Session, path: &Path) -> Result<ExportSummary> {
    let table = session.table().context("no table loaded after upload")?;
    let rows = filter(table, &session.selection());
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_records(table.columns(), rows.iter(), BufWriter::new(file))
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "exported active rows");
    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: rows.len(),
    })
}

pub fn run_periods(input: &Path) -> Result<PeriodListing> {
    let session = load_session(input)?;
    let loaded = session.loaded().context("no table loaded after upload")?;
    Ok(PeriodListing {
        source_name: loaded.summary.source_name.clone(),
        periods: loaded.table.periods().to_vec(),
        rows: loaded.table.len(),
    })
}
