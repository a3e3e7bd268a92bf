//! Core types for repeatcal.
//!
//! This crate provides:
//! - `recurrence` for expanding a recurring event into dated occurrences
//! - `event` types shared with the event API
//! - `store` backends that persist events and assign recurrence group ids
//! - `operations` for the save and delete workflows

pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod filter;
pub mod notice;
pub mod operations;
pub mod recurrence;
pub mod store;

pub use error::{RepeatCalError, RepeatCalResult};
pub use event::{Event, EventInstance, EventTemplate, Frequency, RecurrenceRule};
pub use recurrence::{adjust_for_display_warning, expand};
