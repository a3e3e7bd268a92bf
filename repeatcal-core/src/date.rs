//! Calendar date helpers.
//!
//! All dates are naive `chrono::NaiveDate` values. Month and year arithmetic
//! goes through explicit (year, month, day) triples so that month-end and
//! leap-year handling never depends on the local time zone.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::{RepeatCalError, RepeatCalResult};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for wall-clock times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Gregorian leap year test.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month (1-based).
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Whether `date` is the last day of its month.
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.day() == last_day_of_month(date.year(), date.month())
}

/// Build a date from its parts, failing instead of panicking when chrono
/// cannot represent it.
pub fn ymd(year: i32, month: u32, day: u32) -> RepeatCalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RepeatCalError::DateOutOfRange(format!("{year:04}-{month:02}-{day:02}")))
}

/// Shift a (year, month) pair by `months`, carrying into the year.
pub fn shift_month(year: i32, month: u32, months: i64) -> RepeatCalResult<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + months;
    let year = i32::try_from(index.div_euclid(12))
        .map_err(|_| RepeatCalError::DateOutOfRange(format!("{year} + {months} months")))?;
    let month = index.rem_euclid(12) as u32 + 1;
    Ok((year, month))
}

/// The same month and day one calendar year later.
///
/// February 29 rolls over to March 1 when the following year is not a leap
/// year, so the horizon never ends short of a full year.
pub fn one_year_after(date: NaiveDate) -> RepeatCalResult<NaiveDate> {
    let year = date.year() + 1;
    if date.month() == 2 && date.day() == 29 && !is_leap_year(year) {
        return ymd(year, 3, 1);
    }
    ymd(year, date.month(), date.day())
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> RepeatCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RepeatCalError::MalformedDate(s.to_string()))
}

/// Parse a `HH:MM` wall-clock time.
pub fn parse_time(s: &str) -> RepeatCalResult<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| RepeatCalError::MalformedTime(s.to_string()))
}

/// Serde adapter for `HH:MM` times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        // Accept HH:MM:SS too, some clients send seconds
        NaiveTime::parse_from_str(&s, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
