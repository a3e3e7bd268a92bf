use anyhow::Result;
use chrono::NaiveDate;
use repeatcal_core::operations::{SaveRequest, save_event};
use repeatcal_core::store::EventStore;

use crate::EventArgs;
use crate::commands::{apply_fields, print_saved};

pub async fn run<S>(
    store: &S,
    id: &str,
    title: Option<String>,
    date: Option<NaiveDate>,
    fields: EventArgs,
    limit: usize,
) -> Result<()>
where
    S: EventStore + ?Sized,
{
    let mut form = store.get(id).await?.form;

    if let Some(title) = title {
        form.title = title;
    }
    if let Some(date) = date {
        form.date = date;
    }
    apply_fields(fields, &mut form);

    let request = SaveRequest::Update {
        id: id.to_string(),
        form,
    };
    let outcome = save_event(store, request, limit).await?;
    print_saved(&outcome.notice, &outcome.events);

    Ok(())
}
