//! Error types for repeatcal.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Errors that can occur in repeatcal operations.
#[derive(Error, Debug)]
pub enum RepeatCalError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrenceRule(String),

    #[error("Malformed date '{0}'. Expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("Malformed time '{0}'. Expected HH:MM")]
    MalformedTime(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Recurrence produced more than {0} occurrences")]
    TooManyOccurrences(usize),

    #[error("Repeat end date {end} is before the start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Start time {start} must be before end time {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepeatCalError {
    fn from(e: serde_json::Error) -> Self {
        RepeatCalError::Serialization(e.to_string())
    }
}

/// Result type alias for repeatcal operations.
pub type RepeatCalResult<T> = Result<T, RepeatCalError>;
