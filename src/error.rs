use thiserror::Error;

pub type AlignResult<T> = Result<T, AlignError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid day index: {index} (expected 0..=364)")]
    InvalidDayIndex { index: i64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
