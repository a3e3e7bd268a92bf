//! JSON file store.
//!
//! Events live in a single file shaped like the event API's list response:
//! `{"events": [...]}`. Every mutation reads the file, applies the change and
//! writes it back while holding a lock, so concurrent callers in one process
//! never interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::date::parse_date;
use crate::error::{RepeatCalError, RepeatCalResult};
use crate::event::{Event, EventTemplate};
use crate::store::{EventStore, assign_batch, new_id};

#[derive(Debug, Serialize)]
struct EventFile {
    events: Vec<Event>,
}

/// The file as read, before dates are checked.
#[derive(Deserialize)]
struct RawEventFile {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

/// Reject an event whose `date` or `repeat.endDate` is not a real
/// `YYYY-MM-DD` date.
fn check_dates(event: &serde_json::Value) -> RepeatCalResult<()> {
    let dates = [event.get("date"), event.pointer("/repeat/endDate")];
    for date in dates.into_iter().flatten().filter_map(|v| v.as_str()) {
        parse_date(date)?;
    }
    Ok(())
}

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> RepeatCalResult<Vec<Event>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let corrupt = |e: serde_json::Error| {
            RepeatCalError::Serialization(format!("{}: {}", self.path.display(), e))
        };

        let file: RawEventFile = serde_json::from_str(&content).map_err(corrupt)?;
        file.events
            .into_iter()
            .map(|value| {
                check_dates(&value)?;
                serde_json::from_value(value).map_err(corrupt)
            })
            .collect()
    }

    async fn save(&self, events: Vec<Event>) -> RepeatCalResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let count = events.len();
        let content = serde_json::to_string_pretty(&EventFile { events })?;
        tokio::fs::write(&self.path, content).await?;

        tracing::debug!(path = %self.path.display(), count, "saved events");
        Ok(())
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn list(&self) -> RepeatCalResult<Vec<Event>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn create(&self, form: EventTemplate) -> RepeatCalResult<Event> {
        let _guard = self.lock.lock().await;
        let mut events = self.load().await?;

        let event = Event::new(new_id(), form);
        events.push(event.clone());
        self.save(events).await?;

        Ok(event)
    }

    async fn create_batch(&self, forms: Vec<EventTemplate>) -> RepeatCalResult<Vec<Event>> {
        let _guard = self.lock.lock().await;
        let mut events = self.load().await?;

        let created = assign_batch(forms);
        events.extend(created.iter().cloned());
        self.save(events).await?;

        Ok(created)
    }

    async fn update(&self, id: &str, form: EventTemplate) -> RepeatCalResult<Event> {
        let _guard = self.lock.lock().await;
        let mut events = self.load().await?;

        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| RepeatCalError::EventNotFound(id.to_string()))?;
        event.form = form;
        let updated = event.clone();

        self.save(events).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> RepeatCalResult<()> {
        let _guard = self.lock.lock().await;
        let mut events = self.load().await?;

        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(RepeatCalError::EventNotFound(id.to_string()));
        }

        self.save(events).await
    }

    async fn delete_batch(&self, ids: &[String]) -> RepeatCalResult<()> {
        let _guard = self.lock.lock().await;
        let mut events = self.load().await?;

        events.retain(|e| !ids.contains(&e.id));
        self.save(events).await
    }
}
