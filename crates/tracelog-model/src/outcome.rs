use std::fmt;

use serde::{Deserialize, Serialize};

pub const OK_LABEL: &str = "OK";
pub const NG_LABEL: &str = "NG";

/// Classification of a result value. Unknown values pass through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ok,
    Ng,
    Other(String),
}

impl Outcome {
    pub fn classify(value: &str) -> Self {
        match value {
            OK_LABEL => Self::Ok,
            NG_LABEL => Self::Ng,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Ok => OK_LABEL,
            Self::Ng => NG_LABEL,
            Self::Other(value) => value,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Ng)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
