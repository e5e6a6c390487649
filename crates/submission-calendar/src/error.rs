//! Error types for submission-calendar operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The submission search endpoint answered with something other than 200.
    #[error("Fetch failed with status {status}")]
    Fetch { status: u16 },

    #[error("Submission source error: {0}")]
    Source(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
