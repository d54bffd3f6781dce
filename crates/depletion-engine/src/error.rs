//! Error types for depletion-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepletionError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown periodicity: '{0}' (expected daily or weekly)")]
    UnknownPeriodicity(String),

    #[error("Invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DepletionError>;
