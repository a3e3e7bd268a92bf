//! Save and delete workflows.
//!
//! These sit between the form layer and an [`EventStore`]: they validate
//! input, expand recurring events into occurrences, and pick the right
//! store call. The outcome of each workflow carries a [`Notice`] for the
//! presentation layer.

use crate::error::{RepeatCalError, RepeatCalResult};
use crate::event::{Event, EventTemplate, RecurrenceRule};
use crate::notice::Notice;
use crate::recurrence::expand_with_limit;
use crate::store::EventStore;

/// What the user submitted.
#[derive(Debug, Clone)]
pub enum SaveRequest {
    Create(EventTemplate),
    Update { id: String, form: EventTemplate },
}

#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// Events written by the store, with ids assigned.
    pub events: Vec<Event>,
    pub notice: Notice,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// Number of events removed.
    pub deleted: usize,
    pub notice: Notice,
}

/// Check a form before anything is written.
pub fn validate_form(form: &EventTemplate) -> RepeatCalResult<()> {
    if form.start_time >= form.end_time {
        return Err(RepeatCalError::InvalidTimeRange {
            start: form.start_time,
            end: form.end_time,
        });
    }

    if !form.repeat.is_recurring() {
        return Ok(());
    }

    if form.repeat.interval < 1 {
        return Err(RepeatCalError::InvalidRecurrenceRule(
            "Repeat interval must be at least 1".to_string(),
        ));
    }

    if let Some(end) = form.repeat.end_date
        && end < form.date
    {
        return Err(RepeatCalError::EndBeforeStart {
            start: form.date,
            end,
        });
    }

    Ok(())
}

/// Create or update an event.
///
/// - A recurring create is expanded and stored as one batch.
/// - Editing an event that belongs to a recurrence group detaches that one
///   occurrence: it is saved as a single event and the rest of the group is
///   left alone.
/// - Editing a standalone event into a recurring one replaces it with the
///   expanded series.
pub async fn save_event<S>(store: &S, request: SaveRequest, limit: usize) -> RepeatCalResult<SaveOutcome>
where
    S: EventStore + ?Sized,
{
    match request {
        SaveRequest::Create(form) => {
            validate_form(&form)?;

            let events = if form.repeat.is_recurring() {
                let instances = expand_with_limit(&form, &form.repeat, limit)?;
                tracing::debug!(
                    title = %form.title,
                    occurrences = instances.len(),
                    "expanded recurring event"
                );
                store.create_batch(instances).await?
            } else {
                vec![store.create(form).await?]
            };

            tracing::info!(count = events.len(), "created events");
            Ok(SaveOutcome {
                events,
                notice: Notice::success("Event added."),
            })
        }
        SaveRequest::Update { id, form } => {
            let existing = store.get(&id).await?;

            let events = if existing.group_id().is_some() {
                let mut single = form;
                single.repeat = RecurrenceRule::none();
                validate_form(&single)?;

                tracing::info!(%id, group = ?existing.group_id(), "detaching occurrence from its series");
                vec![store.update(&id, single).await?]
            } else if form.repeat.is_recurring() {
                validate_form(&form)?;

                let instances = expand_with_limit(&form, &form.repeat, limit)?;
                let created = store.create_batch(instances).await?;
                if let Err(err) = store.delete(&id).await {
                    // Roll the series back so the store keeps only the original event
                    let ids: Vec<String> = created.into_iter().map(|e| e.id).collect();
                    if let Err(rollback) = store.delete_batch(&ids).await {
                        tracing::warn!(%id, error = %rollback, "could not roll back new series");
                    }
                    return Err(err);
                }

                tracing::info!(%id, count = created.len(), "replaced event with recurring series");
                created
            } else {
                validate_form(&form)?;
                vec![store.update(&id, form).await?]
            };

            Ok(SaveOutcome {
                events,
                notice: Notice::success("Event updated."),
            })
        }
    }
}

/// Delete a single event, whether or not it belongs to a series.
pub async fn delete_event<S>(store: &S, id: &str) -> RepeatCalResult<DeleteOutcome>
where
    S: EventStore + ?Sized,
{
    let event = store.get(id).await?;

    if event.is_recurring() {
        store.delete_batch(&[event.id.clone()]).await?;
    } else {
        store.delete(id).await?;
    }

    tracing::info!(%id, "deleted event");
    Ok(DeleteOutcome {
        deleted: 1,
        notice: Notice::info("Event deleted."),
    })
}

/// Delete every occurrence in the recurrence group of event `id`.
///
/// An event outside any group is deleted on its own.
pub async fn delete_series<S>(store: &S, id: &str) -> RepeatCalResult<DeleteOutcome>
where
    S: EventStore + ?Sized,
{
    let event = store.get(id).await?;

    let Some(group_id) = event.group_id() else {
        return delete_event(store, id).await;
    };

    let ids: Vec<String> = store
        .group(group_id)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    store.delete_batch(&ids).await?;

    tracing::info!(%group_id, count = ids.len(), "deleted series");
    Ok(DeleteOutcome {
        deleted: ids.len(),
        notice: Notice::info(format!("Deleted {} occurrences.", ids.len())),
    })
}
