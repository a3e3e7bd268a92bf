use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use repeatcal_core::event::Event;
use repeatcal_core::filter::{View, filtered_events, search_events};
use repeatcal_core::store::EventStore;

use crate::render::render_agenda;

pub async fn run<S>(
    store: &S,
    search: &str,
    view: Option<View>,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()>
where
    S: EventStore + ?Sized,
{
    let events = store.list().await?;
    let matching = select(&events, search, view, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for line in render_agenda(&matching) {
        println!("{}", line);
    }

    Ok(())
}

/// Apply the search term and optional view, returning events sorted by date.
fn select<'a>(
    events: &'a [Event],
    search: &str,
    view: Option<View>,
    date: Option<NaiveDate>,
) -> Vec<&'a Event> {
    match view {
        Some(view) => {
            let current = date.unwrap_or_else(|| Local::now().date_naive());
            filtered_events(events, search, current, view)
        }
        None => {
            let mut matching = search_events(events, search);
            matching.sort_by(|a, b| {
                (a.form.date, a.form.start_time).cmp(&(b.form.date, b.form.start_time))
            });
            matching
        }
    }
}
