//! In-memory event list mirrored to key-value storage.
//!
//! # Responsibility
//! - Own the single authoritative list of events for one calendar session.
//! - Write the full list through to storage after every mutation.
//! - Rehydrate the list from storage at startup.
//!
//! # Invariants
//! - Mutations are total: they never fail, including when persistence fails.
//! - Synthesized ids are unique and strictly increase in creation order.
//! - List order is insertion order; updates replace in place.
//! - Missing or malformed stored data loads as an empty list.

use crate::model::event::{Event, EventId, NewEvent};
use crate::repo::kv_repo::KvRepository;
use chrono::Utc;
use log::{error, info, warn};

/// Storage key holding the JSON-encoded event array.
pub const EVENTS_STORAGE_KEY: &str = "events";

/// Serializes events to the stored JSON array form.
pub fn encode_events(events: &[Event]) -> serde_json::Result<String> {
    serde_json::to_string(events)
}

/// Parses the stored JSON array form.
pub fn decode_events(raw: &str) -> serde_json::Result<Vec<Event>> {
    serde_json::from_str(raw)
}

/// Single-writer event state container.
pub struct EventStore<R: KvRepository> {
    repo: R,
    events: Vec<Event>,
}

impl<R: KvRepository> EventStore<R> {
    /// Loads the persisted list from `repo`, defaulting to empty.
    pub fn load(repo: R) -> Self {
        let events = match repo.get_value(EVENTS_STORAGE_KEY) {
            Ok(Some(raw)) => match decode_events(&raw) {
                Ok(events) => events,
                Err(err) => {
                    warn!(
                        "event=events_load module=store status=recovered reason=malformed error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("event=events_load module=store status=recovered reason=storage error={err}");
                Vec::new()
            }
        };

        info!(
            "event=events_load module=store status=ok count={}",
            events.len()
        );
        Self { repo, events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends a new event with an id synthesized from the current time.
    pub fn add(&mut self, fields: NewEvent) -> Event {
        self.add_at(fields, Utc::now().timestamp_millis())
    }

    /// Appends a new event, deriving its id from `now_ms`.
    ///
    /// When `now_ms` is not greater than every existing id, the id becomes
    /// `max_id + 1`.
    pub fn add_at(&mut self, fields: NewEvent, now_ms: i64) -> Event {
        let id = self.next_id(now_ms);
        let event = fields.with_id(id);
        self.events.push(event.clone());
        self.persist("add");
        event
    }

    /// Replaces the event with the same id; no-op when absent.
    ///
    /// Returns whether an entry was replaced.
    pub fn update(&mut self, event: Event) -> bool {
        let replaced = match self.events.iter_mut().find(|slot| slot.id == event.id) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        };
        self.persist("update");
        replaced
    }

    /// Removes the event with `id`; no-op when absent.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        let removed = self.events.len() != before;
        self.persist("remove");
        removed
    }

    /// Replaces the whole list, e.g. after an import.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;
        self.persist("replace_all");
    }

    /// Gives back the underlying repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    fn next_id(&self, now_ms: i64) -> EventId {
        match self.events.iter().map(|event| event.id).max() {
            Some(max_id) if now_ms <= max_id => max_id.saturating_add(1),
            _ => now_ms,
        }
    }

    fn persist(&self, action: &'static str) {
        let encoded = match encode_events(&self.events) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=events_persist module=store status=error action={action} error_code=encode_failed error={err}"
                );
                return;
            }
        };

        match self.repo.put_value(EVENTS_STORAGE_KEY, &encoded) {
            Ok(()) => info!(
                "event=events_persist module=store status=ok action={action} count={}",
                self.events.len()
            ),
            Err(err) => error!(
                "event=events_persist module=store status=error action={action} error_code=write_failed error={err}"
            ),
        }
    }
}
