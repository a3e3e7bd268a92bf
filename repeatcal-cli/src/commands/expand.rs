use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use repeatcal_core::event::{Frequency, RecurrenceRule};
use repeatcal_core::notice::date_adjustment_notice;
use repeatcal_core::recurrence::occurrence_dates;

use crate::render::{Render, format_date_label, pluralize};

pub fn run(
    date: NaiveDate,
    frequency: Frequency,
    interval: u32,
    until: Option<NaiveDate>,
    json: bool,
    limit: usize,
) -> Result<()> {
    let rule = RecurrenceRule {
        end_date: until,
        ..RecurrenceRule::new(frequency, interval)
    };

    let dates = occurrence_dates(date, &rule, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dates)?);
        return Ok(());
    }

    if let Some(notice) = date_adjustment_notice(date, frequency) {
        eprintln!("{}\n", notice.render());
    }

    for d in &dates {
        println!("  {}  {}", d, format_date_label(*d).dimmed());
    }

    println!(
        "\n{}",
        format!(
            "{} {}, {}",
            dates.len(),
            pluralize("occurrence", dates.len()),
            rule.describe()
        )
        .bold()
    );

    Ok(())
}
