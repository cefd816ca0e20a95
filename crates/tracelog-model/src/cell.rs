use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used when a timestamp cell is displayed or exported.
///
/// `%.f` prints nothing when the fractional part is zero, so whole-second
/// values export as `2025-01-05 10:00:00`.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One typed cell of an inspection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    Missing,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Coerce to a trimmed text value, the form categorical columns are kept in.
    ///
    /// Missing becomes the empty string so the row still has a groupable value.
    #[must_use]
    pub fn into_categorical(self) -> Self {
        match self {
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.len() == value.len() {
                    Self::Text(value)
                } else {
                    Self::Text(trimmed.to_string())
                }
            }
            Self::Missing => Self::Text(String::new()),
            other => Self::Text(other.to_string().trim().to_string()),
        }
    }

    /// Append a type-tagged rendering of this cell, used for structural row equality.
    pub fn push_identity(&self, out: &mut String) {
        match self {
            Self::Text(value) => {
                out.push('s');
                out.push_str(&value.len().to_string());
                out.push(':');
                out.push_str(value);
            }
            Self::Integer(value) => {
                out.push('i');
                out.push_str(&value.to_string());
            }
            Self::Float(value) => {
                out.push('f');
                // -0.0 and 0.0 compare equal
                let normalized = if *value == 0.0 { 0.0 } else { *value };
                out.push_str(&normalized.to_string());
            }
            Self::Boolean(value) => out.push(if *value { 'T' } else { 'F' }),
            Self::Timestamp(value) => {
                out.push('t');
                out.push_str(&value.format("%Y%m%dT%H%M%S%.9f").to_string());
            }
            Self::Missing => out.push('_'),
        }
        out.push('\u{1f}');
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{}", value.format(TIMESTAMP_DISPLAY_FORMAT)),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Missing
        } else {
            Self::Text(value.to_string())
        }
    }
}
