use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures cycle computation and configuration failures.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("date {0} is too close to the supported calendar limits")]
    OutOfRange(NaiveDate),
    #[error("range end {end} is before its start {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("preset {index} does not exist ({available} available)")]
    UnknownPreset { index: usize, available: usize },
    #[error("unsupported locale `{0}`")]
    UnknownLocale(String),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
