//! Recurring event expansion.
//!
//! Expands an event template and its recurrence rule into the dated
//! occurrences of the series. Every occurrence is computed from the origin
//! date and the occurrence index, never from the previous occurrence, so a
//! day clamped in a short month does not leak into the months after it.
//!
//! Nothing in this module performs I/O or logs.

use chrono::{Datelike, Days, NaiveDate};

use crate::date::{is_last_day_of_month, is_leap_year, last_day_of_month, one_year_after, shift_month};
use crate::error::{RepeatCalError, RepeatCalResult};
use crate::event::{EventInstance, EventTemplate, Frequency, RecurrenceRule};

/// Upper bound on occurrences produced by a single expansion.
pub const MAX_OCCURRENCES: usize = 10_000;

/// Expand `template` into its occurrences under `rule`.
///
/// A non-recurring rule yields exactly the template's own date. Otherwise
/// occurrences run from `template.date` up to and including the rule's end
/// date, or one calendar year after the start when the rule has none. An end
/// date before the start yields no occurrences.
pub fn expand(template: &EventTemplate, rule: &RecurrenceRule) -> RepeatCalResult<Vec<EventInstance>> {
    expand_with_limit(template, rule, MAX_OCCURRENCES)
}

/// Same as [`expand`] with a caller supplied occurrence cap.
pub fn expand_with_limit(
    template: &EventTemplate,
    rule: &RecurrenceRule,
    limit: usize,
) -> RepeatCalResult<Vec<EventInstance>> {
    let dates = occurrence_dates(template.date, rule, limit)?;

    Ok(dates
        .into_iter()
        .map(|date| EventInstance {
            date,
            repeat: rule.clone(),
            ..template.clone()
        })
        .collect())
}

/// The dates of every occurrence of `rule` starting at `start`.
pub fn occurrence_dates(
    start: NaiveDate,
    rule: &RecurrenceRule,
    limit: usize,
) -> RepeatCalResult<Vec<NaiveDate>> {
    if !rule.is_recurring() {
        return Ok(vec![start]);
    }

    if rule.interval < 1 {
        return Err(RepeatCalError::InvalidRecurrenceRule(format!(
            "interval must be at least 1, got {}",
            rule.interval
        )));
    }

    let end = match rule.end_date {
        Some(end) => end,
        None => one_year_after(start)?,
    };

    let series = Series::new(start, rule.frequency, rule.interval);
    let mut dates = Vec::new();

    for index in 0u64.. {
        // None means the date left chrono's calendar, which is past any end date
        let Some(date) = series.occurrence(index) else {
            break;
        };
        if date > end {
            break;
        }
        if dates.len() >= limit {
            return Err(RepeatCalError::TooManyOccurrences(limit));
        }
        dates.push(date);
    }

    Ok(dates)
}

/// Origin of a recurring series and how to find its n-th occurrence.
struct Series {
    origin: NaiveDate,
    frequency: Frequency,
    interval: u64,
    /// Origin falls on the last day of its month
    was_last_day: bool,
}

impl Series {
    fn new(origin: NaiveDate, frequency: Frequency, interval: u32) -> Self {
        Series {
            origin,
            frequency,
            interval: u64::from(interval),
            was_last_day: is_last_day_of_month(origin),
        }
    }

    fn occurrence(&self, index: u64) -> Option<NaiveDate> {
        let steps = index.checked_mul(self.interval)?;

        match self.frequency {
            Frequency::None => (index == 0).then_some(self.origin),
            Frequency::Daily => self.origin.checked_add_days(Days::new(steps)),
            Frequency::Weekly => self.origin.checked_add_days(Days::new(steps.checked_mul(7)?)),
            Frequency::Monthly => self.monthly(steps),
            Frequency::Yearly => self.yearly(steps),
        }
    }

    fn monthly(&self, months: u64) -> Option<NaiveDate> {
        let months = i64::try_from(months).ok()?;
        let (year, month) = shift_month(self.origin.year(), self.origin.month(), months).ok()?;
        let last_day = last_day_of_month(year, month);

        let day = if self.was_last_day {
            last_day
        } else {
            self.origin.day().min(last_day)
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn yearly(&self, years: u64) -> Option<NaiveDate> {
        let years = i32::try_from(years).ok()?;
        let year = self.origin.year().checked_add(years)?;

        let day = if self.origin.month() == 2 && self.origin.day() == 29 && !is_leap_year(year) {
            28
        } else {
            self.origin.day()
        };

        NaiveDate::from_ymd_opt(year, self.origin.month(), day)
    }
}

/// Preview of how a date will be adjusted for a frequency, used to warn the
/// user once when they pick the date. Returns the adjusted date and whether
/// an adjustment applies.
///
/// This is a simplified check on the picked date only. The per-occurrence
/// rules live in [`expand`].
pub fn adjust_for_display_warning(date: NaiveDate, frequency: Frequency) -> (NaiveDate, bool) {
    match frequency {
        Frequency::None | Frequency::Daily | Frequency::Weekly => (date, false),
        Frequency::Monthly | Frequency::Yearly => {
            if frequency == Frequency::Yearly && date.month() == 2 && date.day() == 29 {
                return (date.with_day(28).unwrap_or(date), true);
            }

            let day = date.day();
            let last_day = last_day_of_month(date.year(), date.month());

            if day >= 29 && day >= last_day {
                (date.with_day(last_day).unwrap_or(date), day == last_day)
            } else {
                (date, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(start: NaiveDate) -> EventTemplate {
        EventTemplate::new(
            "Recurring",
            start,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
    }

    fn dates(start: NaiveDate, rule: RecurrenceRule) -> Vec<NaiveDate> {
        expand(&template(start), &rule)
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect()
    }

    // --- none ---

    #[test]
    fn none_yields_single_instance() {
        let start = date(2024, 10, 15);
        let rule = RecurrenceRule::none().until(date(2025, 10, 15));
        let instances = expand(&template(start), &rule).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].date, start);
    }

    #[test]
    fn none_ignores_zero_interval() {
        let rule = RecurrenceRule::new(Frequency::None, 0);
        assert_eq!(dates(date(2024, 10, 15), rule), vec![date(2024, 10, 15)]);
    }

    // --- daily / weekly ---

    #[test]
    fn daily_inclusive_range() {
        let rule = RecurrenceRule::new(Frequency::Daily, 1).until(date(2024, 10, 5));
        let result = dates(date(2024, 10, 1), rule);
        assert_eq!(
            result,
            vec![
                date(2024, 10, 1),
                date(2024, 10, 2),
                date(2024, 10, 3),
                date(2024, 10, 4),
                date(2024, 10, 5),
            ]
        );
    }

    #[test]
    fn daily_every_two_days() {
        let rule = RecurrenceRule::new(Frequency::Daily, 2).until(date(2024, 10, 7));
        let result = dates(date(2024, 10, 1), rule);
        assert_eq!(
            result,
            vec![date(2024, 10, 1), date(2024, 10, 3), date(2024, 10, 5), date(2024, 10, 7)]
        );
    }

    #[test]
    fn daily_and_weekly_steps_are_exact() {
        for (frequency, days_per_unit) in [(Frequency::Daily, 1), (Frequency::Weekly, 7)] {
            for interval in 1..=5u32 {
                let rule = RecurrenceRule::new(frequency, interval).until(date(2025, 6, 30));
                let result = dates(date(2024, 1, 1), rule);
                assert!(result.len() > 1);
                for pair in result.windows(2) {
                    assert_eq!(
                        (pair[1] - pair[0]).num_days(),
                        i64::from(interval) * days_per_unit
                    );
                }
            }
        }
    }

    #[test]
    fn weekly_every_three_weeks() {
        let rule = RecurrenceRule::new(Frequency::Weekly, 3).until(date(2024, 11, 15));
        let result = dates(date(2024, 10, 1), rule);
        assert_eq!(result, vec![date(2024, 10, 1), date(2024, 10, 22), date(2024, 11, 12)]);
    }

    #[test]
    fn default_horizon_is_one_calendar_year() {
        let rule = RecurrenceRule::new(Frequency::Daily, 1);
        let result = dates(date(2024, 10, 1), rule);
        assert_eq!(result.first(), Some(&date(2024, 10, 1)));
        assert_eq!(result.last(), Some(&date(2025, 10, 1)));
        assert_eq!(result.len(), 366);
    }

    #[test]
    fn default_horizon_spanning_leap_day() {
        // 2024-02-29 falls inside, so a calendar year is 367 days inclusive
        let rule = RecurrenceRule::new(Frequency::Daily, 1);
        let result = dates(date(2023, 3, 1), rule);
        assert_eq!(result.last(), Some(&date(2024, 3, 1)));
        assert_eq!(result.len(), 367);
    }

    #[test]
    fn default_horizon_from_leap_day_rolls_into_march() {
        let rule = RecurrenceRule::new(Frequency::Daily, 1);
        let result = dates(date(2024, 2, 29), rule);
        assert_eq!(result.last(), Some(&date(2025, 3, 1)));
        assert_eq!(result.len(), 367);
    }

    // --- monthly ---

    #[test]
    fn monthly_last_day_origin_follows_month_end() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 1).until(date(2024, 12, 31));
        let result = dates(date(2024, 1, 31), rule);
        assert_eq!(
            result,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31),
                date(2024, 6, 30),
                date(2024, 7, 31),
                date(2024, 8, 31),
                date(2024, 9, 30),
                date(2024, 10, 31),
                date(2024, 11, 30),
                date(2024, 12, 31),
            ]
        );
    }

    #[test]
    fn monthly_last_day_of_short_month_stays_on_month_end() {
        // April 30 is the last day of April, so May gets the 31st
        let rule = RecurrenceRule::new(Frequency::Monthly, 1).until(date(2024, 7, 31));
        let result = dates(date(2024, 4, 30), rule);
        assert_eq!(
            result,
            vec![date(2024, 4, 30), date(2024, 5, 31), date(2024, 6, 30), date(2024, 7, 31)]
        );
    }

    #[test]
    fn monthly_mid_month_keeps_day() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 1).until(date(2024, 6, 30));
        let result = dates(date(2024, 1, 15), rule);
        assert_eq!(
            result,
            vec![
                date(2024, 1, 15),
                date(2024, 2, 15),
                date(2024, 3, 15),
                date(2024, 4, 15),
                date(2024, 5, 15),
                date(2024, 6, 15),
            ]
        );
    }

    #[test]
    fn monthly_clamp_does_not_propagate() {
        // The 30th of January is not a month end: February clamps, March returns to 30
        let rule = RecurrenceRule::new(Frequency::Monthly, 1).until(date(2024, 5, 31));
        let result = dates(date(2024, 1, 30), rule);
        assert_eq!(
            result,
            vec![
                date(2024, 1, 30),
                date(2024, 2, 29),
                date(2024, 3, 30),
                date(2024, 4, 30),
                date(2024, 5, 30),
            ]
        );
    }

    #[test]
    fn monthly_interval_carries_year() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 2).until(date(2025, 2, 15));
        let result = dates(date(2024, 10, 16), rule);
        assert_eq!(result, vec![date(2024, 10, 16), date(2024, 12, 16)]);

        let rule = RecurrenceRule::new(Frequency::Monthly, 5).until(date(2026, 1, 1));
        let result = dates(date(2024, 11, 10), rule);
        assert_eq!(
            result,
            vec![date(2024, 11, 10), date(2025, 4, 10), date(2025, 9, 10)]
        );
    }

    // --- yearly ---

    #[test]
    fn yearly_leap_day_origin() {
        let rule = RecurrenceRule::new(Frequency::Yearly, 1).until(date(2029, 12, 31));
        let result = dates(date(2024, 2, 29), rule);
        assert_eq!(
            result,
            vec![
                date(2024, 2, 29),
                date(2025, 2, 28),
                date(2026, 2, 28),
                date(2027, 2, 28),
                date(2028, 2, 29),
                date(2029, 2, 28),
            ]
        );
    }

    #[test]
    fn yearly_leap_day_default_horizon() {
        let rule = RecurrenceRule::new(Frequency::Yearly, 1);
        let result = dates(date(2024, 2, 29), rule);
        assert_eq!(result, vec![date(2024, 2, 29), date(2025, 2, 28)]);
    }

    #[test]
    fn yearly_century_is_not_leap() {
        let rule = RecurrenceRule::new(Frequency::Yearly, 4).until(date(2104, 12, 31));
        let result = dates(date(2096, 2, 29), rule);
        assert_eq!(result, vec![date(2096, 2, 29), date(2100, 2, 28), date(2104, 2, 29)]);
    }

    #[test]
    fn yearly_every_two_years() {
        let rule = RecurrenceRule::new(Frequency::Yearly, 2).until(date(2028, 10, 15));
        let result = dates(date(2024, 10, 17), rule);
        assert_eq!(result, vec![date(2024, 10, 17), date(2026, 10, 17)]);
    }

    // --- bounds and failures ---

    #[test]
    fn zero_interval_fails_fast() {
        let rule = RecurrenceRule::new(Frequency::Daily, 0);
        let err = expand(&template(date(2024, 10, 1)), &rule).unwrap_err();
        assert!(matches!(err, RepeatCalError::InvalidRecurrenceRule(_)));
    }

    #[test]
    fn end_before_start_is_empty() {
        let rule = RecurrenceRule::new(Frequency::Weekly, 1).until(date(2024, 9, 1));
        assert!(dates(date(2024, 10, 1), rule).is_empty());
    }

    #[test]
    fn end_equal_to_start_is_single_occurrence() {
        let rule = RecurrenceRule::new(Frequency::Monthly, 1).until(date(2024, 10, 1));
        assert_eq!(dates(date(2024, 10, 1), rule), vec![date(2024, 10, 1)]);
    }

    #[test]
    fn occurrence_cap_is_enforced() {
        let rule = RecurrenceRule::new(Frequency::Daily, 1).until(date(2100, 1, 1));
        let err = expand_with_limit(&template(date(2024, 1, 1)), &rule, 100).unwrap_err();
        assert!(matches!(err, RepeatCalError::TooManyOccurrences(100)));
    }

    #[test]
    fn huge_interval_terminates() {
        let rule = RecurrenceRule::new(Frequency::Yearly, u32::MAX).until(NaiveDate::MAX);
        assert_eq!(dates(date(2024, 1, 1), rule), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn instances_copy_template_fields() {
        let mut t = template(date(2024, 10, 1));
        t.location = "Room B".to_string();
        t.notification_time = 10;
        let rule = RecurrenceRule::new(Frequency::Weekly, 1).until(date(2024, 10, 15));

        let instances = expand(&t, &rule).unwrap();
        assert_eq!(instances.len(), 3);
        for instance in &instances {
            assert_eq!(instance.title, "Recurring");
            assert_eq!(instance.location, "Room B");
            assert_eq!(instance.notification_time, 10);
            assert_eq!(instance.repeat, rule);
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        let t = template(date(2024, 1, 31));
        let rule = RecurrenceRule::new(Frequency::Monthly, 1);
        assert_eq!(expand(&t, &rule).unwrap(), expand(&t, &rule).unwrap());
    }

    // --- display warning ---

    #[test]
    fn warning_daily_weekly_never_adjust() {
        let d = date(2024, 1, 31);
        assert_eq!(adjust_for_display_warning(d, Frequency::Daily), (d, false));
        assert_eq!(adjust_for_display_warning(d, Frequency::Weekly), (d, false));
    }

    #[test]
    fn warning_monthly_month_end() {
        let d = date(2024, 1, 31);
        assert_eq!(adjust_for_display_warning(d, Frequency::Monthly), (date(2024, 1, 31), true));

        let d = date(2024, 4, 30);
        assert_eq!(adjust_for_display_warning(d, Frequency::Monthly), (date(2024, 4, 30), true));
    }

    #[test]
    fn warning_monthly_leap_february() {
        let d = date(2024, 2, 29);
        assert_eq!(adjust_for_display_warning(d, Frequency::Monthly), (d, true));
    }

    #[test]
    fn warning_yearly_leap_day() {
        let d = date(2024, 2, 29);
        assert_eq!(adjust_for_display_warning(d, Frequency::Yearly), (date(2024, 2, 28), true));
    }

    #[test]
    fn warning_not_month_end() {
        let d = date(2024, 1, 30);
        assert_eq!(adjust_for_display_warning(d, Frequency::Monthly), (d, false));
        let d = date(2024, 3, 15);
        assert_eq!(adjust_for_display_warning(d, Frequency::Yearly), (d, false));
    }

    // --- cross-check against the rrule crate ---

    fn rrule_dates(ical: &str) -> Vec<NaiveDate> {
        let set: rrule::RRuleSet = ical.parse().unwrap();
        set.all(1000).dates.iter().map(|dt| dt.date_naive()).collect()
    }

    #[test]
    fn daily_matches_rrule() {
        let ours = dates(
            date(2024, 2, 20),
            RecurrenceRule::new(Frequency::Daily, 3).until(date(2024, 4, 2)),
        );
        let theirs =
            rrule_dates("DTSTART:20240220T000000Z\nRRULE:FREQ=DAILY;INTERVAL=3;UNTIL=20240402T000000Z");
        assert_eq!(ours, theirs);
    }

    #[test]
    fn weekly_matches_rrule() {
        let ours = dates(
            date(2024, 10, 1),
            RecurrenceRule::new(Frequency::Weekly, 2).until(date(2025, 3, 1)),
        );
        let theirs =
            rrule_dates("DTSTART:20241001T000000Z\nRRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=20250301T000000Z");
        assert_eq!(ours, theirs);
    }

    #[test]
    fn monthly_last_day_matches_rrule() {
        let ours = dates(
            date(2024, 1, 31),
            RecurrenceRule::new(Frequency::Monthly, 1).until(date(2025, 1, 31)),
        );
        let theirs = rrule_dates(
            "DTSTART:20240131T000000Z\nRRULE:FREQ=MONTHLY;BYMONTHDAY=-1;UNTIL=20250131T000000Z",
        );
        assert_eq!(ours, theirs);
    }
}
