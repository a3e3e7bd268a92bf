//! User-facing notices.
//!
//! Operations return a [`Notice`] describing their outcome instead of
//! showing anything themselves; the presentation layer decides how to
//! render it.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::RepeatCalError;
use crate::event::Frequency;
use crate::recurrence::adjust_for_display_warning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Error notice for a failed operation.
    pub fn from_error(err: &RepeatCalError) -> Self {
        let title = match err {
            RepeatCalError::InvalidRecurrenceRule(_) => "Invalid recurrence",
            RepeatCalError::MalformedDate(_) | RepeatCalError::MalformedTime(_) => {
                "Invalid date or time"
            }
            RepeatCalError::EndBeforeStart { .. } => "Invalid repeat end date",
            RepeatCalError::InvalidTimeRange { .. } => "Invalid time range",
            RepeatCalError::TooManyOccurrences(_) => "Too many occurrences",
            RepeatCalError::EventNotFound(_) => "Event not found",
            _ => "Operation failed",
        };

        Self::error(title).with_description(err.to_string())
    }
}

/// Warning to show when the picked date will be adjusted for `frequency`.
pub fn date_adjustment_notice(date: NaiveDate, frequency: Frequency) -> Option<Notice> {
    let (adjusted, was_adjusted) = adjust_for_display_warning(date, frequency);
    if !was_adjusted {
        return None;
    }

    let description = if frequency == Frequency::Yearly && date.month() == 2 && date.day() == 29 {
        format!("February 29 does not exist every year; non-leap years use {}.", adjusted.format("%B %-d"))
    } else {
        "The date was adjusted to fit the repeat type: occurrences fall on the last day of each month."
            .to_string()
    };

    Some(Notice::warning("Date auto-adjusted").with_description(description))
}
