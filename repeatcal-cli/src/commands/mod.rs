pub mod add;
pub mod check;
pub mod delete;
pub mod edit;
pub mod expand;
pub mod list;

use owo_colors::OwoColorize;
use repeatcal_core::event::{Event, EventTemplate};
use repeatcal_core::notice::Notice;

use crate::EventArgs;
use crate::render::{Render, pluralize};

/// Default lead time for notifications, in minutes.
pub const DEFAULT_NOTIFY_MINUTES: u32 = 10;

/// Overwrite the form fields that were given on the command line.
pub fn apply_fields(fields: EventArgs, form: &mut EventTemplate) {
    if let Some(start) = fields.start {
        form.start_time = start;
    }
    if let Some(end) = fields.end {
        form.end_time = end;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(location) = fields.location {
        form.location = location;
    }
    if let Some(category) = fields.category {
        form.category = category;
    }
    if let Some(minutes) = fields.notify {
        form.notification_time = minutes;
    }
    if let Some(frequency) = fields.repeat {
        form.repeat.frequency = frequency;
    }
    if let Some(interval) = fields.interval {
        form.repeat.interval = interval;
    }
    if let Some(until) = fields.until {
        form.repeat.end_date = Some(until);
    }
}

/// Print the outcome notice and the events it touched.
pub fn print_saved(notice: &Notice, events: &[Event]) {
    println!("{}", notice.render());

    if let Some(first) = events.first()
        && events.len() > 1
    {
        let last = &events[events.len() - 1];
        println!(
            "  {} {} from {} to {}",
            events.len(),
            pluralize("occurrence", events.len()),
            first.form.date,
            last.form.date
        );
        if let Some(group) = first.group_id() {
            println!("  {}", format!("series {}", group).dimmed());
        }
    } else {
        for event in events {
            println!("{}", event.render());
        }
    }
}
