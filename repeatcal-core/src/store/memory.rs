//! In-memory store, used by tests and in-process callers.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{RepeatCalError, RepeatCalResult};
use crate::event::{Event, EventTemplate};
use crate::store::{EventStore, assign_batch, new_id};

/// Store backed by a `Vec`. Nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given events already stored.
    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryStore {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list(&self) -> RepeatCalResult<Vec<Event>> {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        Ok(events.clone())
    }

    async fn create(&self, form: EventTemplate) -> RepeatCalResult<Event> {
        let event = Event::new(new_id(), form);
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event.clone());
        Ok(event)
    }

    async fn create_batch(&self, forms: Vec<EventTemplate>) -> RepeatCalResult<Vec<Event>> {
        let created = assign_batch(forms);
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(&self, id: &str, form: EventTemplate) -> RepeatCalResult<Event> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| RepeatCalError::EventNotFound(id.to_string()))?;
        event.form = form;
        Ok(event.clone())
    }

    async fn delete(&self, id: &str) -> RepeatCalResult<()> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RepeatCalError::EventNotFound(id.to_string()))?;
        events.remove(index);
        Ok(())
    }

    async fn delete_batch(&self, ids: &[String]) -> RepeatCalResult<()> {
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.retain(|e| !ids.contains(&e.id));
        Ok(())
    }
}
