//! Event types shared by the expander, the stores and the CLI.
//!
//! The serde representation mirrors the JSON used by the event API
//! (`startTime`, `notificationTime`, `repeat.type`, ...), so a form can be
//! posted as-is and a stored event read back without conversion.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::date::hhmm;
use crate::error::{RepeatCalError, RepeatCalResult};
use crate::recurrence;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::None => "none",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Unit name used when describing an interval ("every 2 weeks").
    pub fn unit(&self) -> &'static str {
        match self {
            Frequency::None => "",
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RepeatCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Frequency::None),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(RepeatCalError::InvalidRecurrenceRule(format!(
                "unknown frequency '{other}' (expected none, daily, weekly, monthly or yearly)"
            ))),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// Repetition rule attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    #[serde(rename = "type")]
    pub frequency: Frequency,
    /// Every N frequency units. Must be at least 1 for recurring rules.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Last date (inclusive) an occurrence may fall on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Recurrence group id, assigned by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        RecurrenceRule {
            frequency,
            interval,
            end_date: None,
            id: None,
        }
    }

    /// A rule for a one-off event.
    pub fn none() -> Self {
        Self::new(Frequency::None, 1)
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency != Frequency::None
    }

    /// Human readable description, e.g. "every 2 weeks until 2024-12-31".
    pub fn describe(&self) -> String {
        if !self.is_recurring() {
            return "does not repeat".to_string();
        }

        let mut text = if self.interval == 1 {
            format!("every {}", self.frequency.unit())
        } else {
            format!("every {} {}s", self.interval, self.frequency.unit())
        };

        if let Some(end) = self.end_date {
            text.push_str(&format!(" until {}", end));
        }

        text
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

/// An event as entered by the user, before the store assigns it an id.
///
/// Used both as the template handed to the expander and as each expanded
/// occurrence (see [`EventInstance`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    /// Minutes before the start time to notify.
    #[serde(default)]
    pub notification_time: u32,
    #[serde(default)]
    pub repeat: RecurrenceRule,
}

/// One dated occurrence produced by the expander.
pub type EventInstance = EventTemplate;

impl EventTemplate {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        EventTemplate {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            notification_time: 0,
            repeat: RecurrenceRule::none(),
        }
    }

    pub fn with_repeat(mut self, repeat: RecurrenceRule) -> Self {
        self.repeat = repeat;
        self
    }

    /// Expand this template using its own recurrence rule.
    pub fn expand(&self) -> RepeatCalResult<Vec<EventInstance>> {
        recurrence::expand(self, &self.repeat)
    }
}

/// An event persisted by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(flatten)]
    pub form: EventTemplate,
}

impl Event {
    pub fn new(id: impl Into<String>, form: EventTemplate) -> Self {
        Event {
            id: id.into(),
            form,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.form.repeat.is_recurring()
    }

    /// Recurrence group this event belongs to, if any.
    pub fn group_id(&self) -> Option<&str> {
        self.form.repeat.id.as_deref()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.form.title)
    }
}
