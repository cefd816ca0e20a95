//! Group-by-then-count summaries over an active row subset.
//!
//! All counts are exact integers taken from the rows. Percentages exist only
//! for sizing chart segments and are never turned back into counts.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use tracelog_model::{NG_LABEL, OK_LABEL, Outcome};

use crate::filter::ActiveRows;

/// Row counts per distinct result value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultCounts(BTreeMap<String, usize>);

impl ResultCounts {
    fn add(&mut self, label: &str) {
        *self.0.entry(label.to_string()).or_default() += 1;
    }

    pub fn get(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or_default()
    }

    pub fn ok(&self) -> usize {
        self.get(OK_LABEL)
    }

    pub fn ng(&self) -> usize {
        self.get(NG_LABEL)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct result values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Most frequent first; ties by label.
    pub fn ordered(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by_key(|(label, count)| (Reverse(*count), *label));
        entries
    }

    /// Copy with `OK` and `NG` present, zero when absent from the data.
    #[must_use]
    pub fn with_primary_outcomes(&self) -> Self {
        let mut filled = self.clone();
        for label in [OK_LABEL, NG_LABEL] {
            filled.0.entry(label.to_string()).or_default();
        }
        filled
    }

    /// Chart segments, in [`ordered`](Self::ordered) order.
    pub fn shares(&self) -> Vec<Share> {
        let total = self.total();
        self.ordered()
            .into_iter()
            .map(|(label, count)| Share {
                label: label.to_string(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            })
            .collect()
    }
}

/// One segment of a donut chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    /// Exact row count; display this, not a value derived from `percent`.
    pub count: usize,
    /// Share of the total in percent, for angular sizing.
    pub percent: f64,
}

impl Share {
    pub fn display_label(&self) -> String {
        format!("{:.1}% ({})", self.percent, self.count)
    }
}

/// OK/NG counts for one calendar day. Both are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub ok: usize,
    pub ng: usize,
    /// Results other than OK/NG recorded on this day.
    pub other: usize,
}

impl DailyCount {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ok: 0,
            ng: 0,
            other: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.ng + self.other
    }
}

/// Result counts for one value of a category column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub value: String,
    pub counts: ResultCounts,
    /// Donut segments for this value.
    pub shares: Vec<Share>,
}

impl CategoryBreakdown {
    pub fn total(&self) -> usize {
        self.counts.total()
    }
}

/// Count rows per result value. Values absent from the data are not invented.
pub fn overall_counts(rows: &ActiveRows<'_>) -> ResultCounts {
    let table = rows.table();
    let mut counts = ResultCounts::default();
    for record in rows.iter() {
        if let Some(label) = table.result_label(record) {
            counts.add(label);
        }
    }
    counts
}

/// Per-day OK/NG counts, ascending by date. Rows without a timestamp are skipped.
pub fn daily_counts(rows: &ActiveRows<'_>) -> Vec<DailyCount> {
    let table = rows.table();
    let mut days: BTreeMap<NaiveDate, DailyCount> = BTreeMap::new();
    for record in rows.iter() {
        let Some(timestamp) = record.timestamp() else {
            continue;
        };
        let date = timestamp.date();
        let day = days.entry(date).or_insert_with(|| DailyCount::new(date));
        match table.outcome(record) {
            Some(Outcome::Ok) => day.ok += 1,
            Some(Outcome::Ng) => day.ng += 1,
            _ => day.other += 1,
        }
    }
    days.into_values().collect()
}

/// Result counts per distinct value of `column`, ascending by value.
///
/// Only values that occur in `rows` appear. A column missing from the table
/// yields no entries.
pub fn category_counts(rows: &ActiveRows<'_>, column: &str) -> Vec<CategoryBreakdown> {
    let table = rows.table();
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    let mut groups: BTreeMap<String, ResultCounts> = BTreeMap::new();
    for record in rows.iter() {
        let value = record
            .cell(index)
            .map(ToString::to_string)
            .unwrap_or_default();
        let label = table.result_label(record).unwrap_or_default();
        groups.entry(value).or_default().add(label);
    }
    groups
        .into_iter()
        .map(|(value, counts)| CategoryBreakdown {
            value,
            shares: counts.shares(),
            counts,
        })
        .collect()
}
