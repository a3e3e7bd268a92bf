//! Event persistence.
//!
//! The store owns event identity: it assigns every event an id and gives
//! each batch of recurring occurrences a shared recurrence group id. The
//! expander never sees either.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{RepeatCalError, RepeatCalResult};
use crate::event::{Event, EventTemplate};

/// Persistence backend for events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All stored events, in insertion order.
    async fn list(&self) -> RepeatCalResult<Vec<Event>>;

    /// Store a single event.
    async fn create(&self, form: EventTemplate) -> RepeatCalResult<Event>;

    /// Store a batch of occurrences. Recurring forms in the batch share one
    /// freshly generated group id.
    async fn create_batch(&self, forms: Vec<EventTemplate>) -> RepeatCalResult<Vec<Event>>;

    /// Replace the fields of an existing event, keeping its id.
    async fn update(&self, id: &str, form: EventTemplate) -> RepeatCalResult<Event>;

    async fn delete(&self, id: &str) -> RepeatCalResult<()>;

    /// Delete every listed event. Unknown ids are ignored.
    async fn delete_batch(&self, ids: &[String]) -> RepeatCalResult<()>;

    async fn get(&self, id: &str) -> RepeatCalResult<Event> {
        self.list()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| RepeatCalError::EventNotFound(id.to_string()))
    }

    /// Every event in the recurrence group `group_id`.
    async fn group(&self, group_id: &str) -> RepeatCalResult<Vec<Event>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|e| e.group_id() == Some(group_id))
            .collect())
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Give each form an id, and recurring forms a common group id.
pub(crate) fn assign_batch(forms: Vec<EventTemplate>) -> Vec<Event> {
    let group_id = new_id();

    forms
        .into_iter()
        .map(|mut form| {
            form.repeat.id = form.repeat.is_recurring().then(|| group_id.clone());
            Event::new(new_id(), form)
        })
        .collect()
}
