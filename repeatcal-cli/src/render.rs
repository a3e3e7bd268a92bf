//! Terminal rendering for repeatcal types.
//!
//! Extension traits that add colored output to repeatcal-core types using
//! owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use repeatcal_core::event::Event;
use repeatcal_core::notice::{Notice, NoticeLevel};

/// Marker shown next to events that belong to a recurrence group.
pub const RECURRING_MARKER: &str = "↻";

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Notice {
    fn render(&self) -> String {
        let head = match self.level {
            NoticeLevel::Info => format!("{} {}", "i".blue(), self.title.bold()),
            NoticeLevel::Success => format!("{} {}", "✓".green(), self.title.green()),
            NoticeLevel::Warning => format!("{} {}", "!".yellow(), self.title.yellow()),
            NoticeLevel::Error => format!("{} {}", "✗".red(), self.title.red()),
        };

        match &self.description {
            Some(description) => format!("{}\n  {}", head, description.dimmed()),
            None => head,
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let form = &self.form;
        let time = format!(
            "{}-{}",
            form.start_time.format("%H:%M"),
            form.end_time.format("%H:%M")
        );

        let mut line = format!("  {} {}", time, form.title);

        if self.is_recurring() {
            line.push_str(&format!(
                " {}",
                format!("{} {}", RECURRING_MARKER, form.repeat.describe()).cyan()
            ));
        }
        if !form.location.is_empty() {
            line.push_str(&format!(" @ {}", form.location));
        }
        if !form.category.is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", form.category).dimmed()));
        }

        format!("{} {}", line, self.id.dimmed())
    }
}

/// Format a date as a day header (e.g. "Tue Oct 1 2024").
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%a %b %-d %Y").to_string()
}

/// Render events grouped under one header per day. Expects events sorted
/// by date.
pub fn render_agenda(events: &[&Event]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for event in events {
        if current_date != Some(event.form.date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(format_date_label(event.form.date).bold().to_string());
            current_date = Some(event.form.date);
        }
        lines.push(event.render());
    }

    lines
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
