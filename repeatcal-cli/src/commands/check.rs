use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use repeatcal_core::event::Frequency;
use repeatcal_core::notice::date_adjustment_notice;
use repeatcal_core::recurrence::adjust_for_display_warning;

use crate::render::Render;

pub fn run(date: NaiveDate, frequency: Frequency) -> Result<()> {
    let (adjusted, was_adjusted) = adjust_for_display_warning(date, frequency);

    match date_adjustment_notice(date, frequency) {
        Some(notice) => {
            println!("{}", notice.render());
            println!("  {} -> {}", date, adjusted.to_string().yellow());
        }
        None => {
            println!("{}", format!("No adjustment needed for {} ({})", date, frequency).green());
        }
    }

    tracing::debug!(%date, %adjusted, was_adjusted, %frequency, "checked date adjustment");
    Ok(())
}
