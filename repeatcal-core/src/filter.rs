//! Search and calendar view filtering for stored events.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::date::last_day_of_month;
use crate::error::RepeatCalError;
use crate::event::Event;

/// Calendar view used to restrict listed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    Week,
    #[default]
    Month,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Week => f.write_str("week"),
            View::Month => f.write_str("month"),
        }
    }
}

impl FromStr for View {
    type Err = RepeatCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(View::Week),
            "month" => Ok(View::Month),
            other => Err(RepeatCalError::Config(format!(
                "unknown view '{other}' (expected week or month)"
            ))),
        }
    }
}

fn contains_term(target: &str, term: &str) -> bool {
    target.to_lowercase().contains(&term.to_lowercase())
}

/// Events whose title, description or location contain `term`, ignoring case.
pub fn search_events<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| {
            contains_term(&e.form.title, term)
                || contains_term(&e.form.description, term)
                || contains_term(&e.form.location, term)
        })
        .collect()
}

/// Events dated within `[start, end]`.
pub fn filter_by_date_range<'a, I>(events: I, start: NaiveDate, end: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| e.form.date >= start && e.form.date <= end)
        .collect()
}

/// Sunday through Saturday of the week containing `date`.
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    (start, end)
}

/// First and last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = date
        .with_day(last_day_of_month(date.year(), date.month()))
        .unwrap_or(date);
    (start, end)
}

/// Events matching `term` that fall inside the `view` around `current_date`,
/// sorted by date and start time.
pub fn filtered_events<'a>(
    events: &'a [Event],
    term: &str,
    current_date: NaiveDate,
    view: View,
) -> Vec<&'a Event> {
    let searched = search_events(events, term);

    let (start, end) = match view {
        View::Week => week_range(current_date),
        View::Month => month_range(current_date),
    };

    let mut filtered = filter_by_date_range(searched, start, end);
    filtered.sort_by(|a, b| {
        (a.form.date, a.form.start_time).cmp(&(b.form.date, b.form.start_time))
    });
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTemplate;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, title: &str, on: NaiveDate) -> Event {
        let mut form = EventTemplate::new(
            title,
            on,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        form.description = format!("{title} description");
        form.location = "Room A".to_string();
        Event::new(id, form)
    }

    fn sample() -> Vec<Event> {
        vec![
            event("1", "Project kickoff", date(2024, 7, 1)),
            event("2", "Team meeting", date(2024, 7, 2)),
            event("3", "Lunch", date(2024, 7, 15)),
            event("4", "Team retro", date(2024, 8, 1)),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let events = sample();
        assert_eq!(ids(&search_events(&events, "TEAM")), vec!["2", "4"]);
    }

    #[test]
    fn search_matches_location_and_description() {
        let mut events = sample();
        events[2].form.location = "Cafeteria".to_string();
        assert_eq!(ids(&search_events(&events, "cafeteria")), vec!["3"]);
        assert_eq!(ids(&search_events(&events, "kickoff description")), vec!["1"]);
    }

    #[test]
    fn empty_term_matches_everything() {
        let events = sample();
        assert_eq!(search_events(&events, "").len(), 4);
    }

    #[test]
    fn week_range_starts_on_sunday() {
        // 2024-07-03 is a Wednesday
        assert_eq!(week_range(date(2024, 7, 3)), (date(2024, 6, 30), date(2024, 7, 6)));
        // A Sunday is its own week start
        assert_eq!(week_range(date(2024, 6, 30)), (date(2024, 6, 30), date(2024, 7, 6)));
    }

    #[test]
    fn month_range_covers_whole_month() {
        assert_eq!(month_range(date(2024, 2, 10)), (date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn week_view() {
        let events = sample();
        let result = filtered_events(&events, "", date(2024, 7, 3), View::Week);
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn month_view_with_search() {
        let events = sample();
        let result = filtered_events(&events, "team", date(2024, 7, 10), View::Month);
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn results_are_sorted() {
        let mut events = sample();
        events.reverse();
        let result = filtered_events(&events, "", date(2024, 7, 10), View::Month);
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }
}
