//! Non-fatal conditions surfaced alongside a rendered view.

use std::fmt;

use serde::Serialize;

/// Dashboard panel or control that depends on a recognized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Summary,
    DailyTrend,
    PeriodSelection,
    ModelBreakdown,
    StationBreakdown,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary => "result summary",
            Self::DailyTrend => "daily trend",
            Self::PeriodSelection => "period selection",
            Self::ModelBreakdown => "model breakdown",
            Self::StationBreakdown => "station breakdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A recognized column is absent; `feature` is skipped for this render.
    SchemaWarning { column: String, feature: Feature },
    /// The timestamp column exists but no value parsed as a date.
    NoPeriods,
    /// The active view has no rows.
    EmptySelection,
    /// The active view has no NG rows.
    NoFailures,
}

impl Notice {
    pub fn missing_column(column: &str, feature: Feature) -> Self {
        Self::SchemaWarning {
            column: column.to_string(),
            feature,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::SchemaWarning { .. } | Self::NoPeriods => Severity::Warning,
            Self::EmptySelection | Self::NoFailures => Severity::Info,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::SchemaWarning { column, feature } => {
                format!("no '{column}' column; {} skipped", feature.name())
            }
            Self::NoPeriods => "no parseable timestamps; showing all rows".to_string(),
            Self::EmptySelection => "no data for the selected period".to_string(),
            Self::NoFailures => "no NG rows in the selected period".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
