//! Calendar use-case service.
//!
//! # Responsibility
//! - Provide the save/delete/search entry points the views call.
//! - Gate every save through the event validator before touching the store.
//!
//! # Invariants
//! - A rejected save leaves the store and storage untouched.
//! - Service layer remains storage-agnostic.

use crate::model::event::{Event, EventDraft, EventId};
use crate::repo::kv_repo::KvRepository;
use crate::search::event_filter::{events_on, filter_events, EventQuery};
use crate::store::event_store::EventStore;
use crate::validation::event_validator::{validate_event, EventValidationError, EventWrite};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for calendar use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Draft failed a save rule; the draft can be corrected and resubmitted.
    Validation(EventValidationError),
    /// Edit targets an id that is no longer in the list.
    EventNotFound(EventId),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::EventNotFound(_) => None,
        }
    }
}

impl From<EventValidationError> for CalendarError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Calendar facade owning the event store for one session.
pub struct CalendarService<R: KvRepository> {
    store: EventStore<R>,
}

impl<R: KvRepository> CalendarService<R> {
    /// Rehydrates the event list from `repo`.
    pub fn open(repo: R) -> Self {
        Self {
            store: EventStore::load(repo),
        }
    }

    /// Full event list in insertion order.
    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.store.get(id)
    }

    /// Blank draft for a new event on `date`.
    pub fn new_draft(&self, date: NaiveDate) -> EventDraft {
        EventDraft::new_on(date)
    }

    /// Edit draft for an existing event.
    pub fn edit_draft(&self, id: EventId) -> Option<EventDraft> {
        self.store.get(id).map(EventDraft::from_event)
    }

    /// Checks a draft without saving it.
    pub fn validate(&self, draft: &EventDraft) -> Result<EventWrite, EventValidationError> {
        validate_event(draft, self.store.events())
    }

    /// Validates and saves a draft, creating or replacing one event.
    ///
    /// # Errors
    /// - [`CalendarError::Validation`] when a save rule fails.
    /// - [`CalendarError::EventNotFound`] when editing an id that was removed.
    pub fn save_event(&mut self, draft: &EventDraft) -> Result<Event, CalendarError> {
        let write = match self.validate(draft) {
            Ok(write) => write,
            Err(err) => {
                debug!(
                    "event=event_save module=service status=rejected code={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        match write {
            EventWrite::Create(fields) => {
                let event = self.store.add(fields);
                info!(
                    "event=event_save module=service status=ok action=create id={}",
                    event.id
                );
                Ok(event)
            }
            EventWrite::Update(event) => {
                if self.store.get(event.id).is_none() {
                    return Err(CalendarError::EventNotFound(event.id));
                }
                self.store.update(event.clone());
                info!(
                    "event=event_save module=service status=ok action=update id={}",
                    event.id
                );
                Ok(event)
            }
        }
    }

    /// Deletes an event by id; returns whether one was removed.
    pub fn delete_event(&mut self, id: EventId) -> bool {
        let removed = self.store.remove(id);
        info!("event=event_delete module=service status=ok id={id} removed={removed}");
        removed
    }

    /// Replaces every event, e.g. from an imported list.
    pub fn replace_events(&mut self, events: Vec<Event>) {
        self.store.replace_all(events);
    }

    /// Matching events across all dates, ordered by start.
    pub fn search(&self, query: &EventQuery) -> Vec<&Event> {
        filter_events(self.store.events(), query)
    }

    /// Matching events on one date, ordered by start.
    pub fn events_on(&self, date: NaiveDate, query: &EventQuery) -> Vec<&Event> {
        events_on(self.store.events(), date, query)
    }

    /// Gives back the underlying repository.
    pub fn into_repo(self) -> R {
        self.store.into_repo()
    }
}
