//! Case-insensitive title filtering and agenda ordering.
//!
//! # Invariants
//! - Blank search text (empty or whitespace only) matches every event.
//! - Non-blank text is matched as typed, inner and outer spaces included.
//! - Results are ordered by `(date, start)`; ties keep list order.

use crate::model::event::Event;
use chrono::NaiveDate;

/// Search options applied to every calendar view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Substring matched case-insensitively against titles.
    pub text: String,
}

impl EventQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns whether `event` passes this query.
    pub fn matches(&self, event: &Event) -> bool {
        if self.is_blank() {
            return true;
        }
        event
            .title
            .to_lowercase()
            .contains(&self.text.to_lowercase())
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Returns events matching `query`, ordered by start date-time.
pub fn filter_events<'a>(events: &'a [Event], query: &EventQuery) -> Vec<&'a Event> {
    let mut hits = events
        .iter()
        .filter(|event| query.matches(event))
        .collect::<Vec<_>>();
    hits.sort_by_key(|event| event.starts_at());
    hits
}

/// Returns the filtered, ordered events on one date.
pub fn events_on<'a>(events: &'a [Event], date: NaiveDate, query: &EventQuery) -> Vec<&'a Event> {
    filter_events(events, query)
        .into_iter()
        .filter(|event| event.date == date)
        .collect()
}
