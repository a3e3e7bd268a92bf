use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate, NaiveTime};
use repeatcal_core::event::EventTemplate;
use repeatcal_core::notice::date_adjustment_notice;
use repeatcal_core::operations::{SaveRequest, save_event};
use repeatcal_core::store::EventStore;

use crate::EventArgs;
use crate::commands::{DEFAULT_NOTIFY_MINUTES, apply_fields, print_saved};
use crate::render::Render;

/// One hour after `start`, unless that runs past midnight.
fn default_end(start: NaiveTime) -> Result<NaiveTime> {
    let (end, wrapped) = start.overflowing_add_signed(Duration::hours(1));
    if wrapped != 0 {
        return Err(anyhow!(
            "an event starting at {} would end after midnight, pass --end",
            start.format("%H:%M")
        ));
    }
    Ok(end)
}

pub async fn run<S>(store: &S, title: String, date: NaiveDate, fields: EventArgs, limit: usize) -> Result<()>
where
    S: EventStore + ?Sized,
{
    let start_time = fields.start.ok_or_else(|| anyhow!("--start is required"))?;
    let end_time = match fields.end {
        Some(end) => end,
        None => default_end(start_time)?,
    };

    let mut form = EventTemplate::new(title, date, start_time, end_time);
    form.notification_time = DEFAULT_NOTIFY_MINUTES;
    apply_fields(fields, &mut form);

    if form.repeat.is_recurring()
        && let Some(notice) = date_adjustment_notice(form.date, form.repeat.frequency)
    {
        println!("{}", notice.render());
    }

    let outcome = save_event(store, SaveRequest::Create(form), limit).await?;
    print_saved(&outcome.notice, &outcome.events);

    Ok(())
}
