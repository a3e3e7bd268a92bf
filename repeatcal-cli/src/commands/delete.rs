use anyhow::Result;
use repeatcal_core::operations::{delete_event, delete_series};
use repeatcal_core::store::EventStore;

use crate::render::Render;

pub async fn run<S>(store: &S, id: &str, all: bool) -> Result<()>
where
    S: EventStore + ?Sized,
{
    let outcome = if all {
        delete_series(store, id).await?
    } else {
        delete_event(store, id).await?
    };

    println!("{}", outcome.notice.render());
    Ok(())
}
