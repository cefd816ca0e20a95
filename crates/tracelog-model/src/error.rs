use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid period '{value}': expected YYYY-MM")]
    InvalidPeriod { value: String },
    #[error("row has {actual} cells but table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
