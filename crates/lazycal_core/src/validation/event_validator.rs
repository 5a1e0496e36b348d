//! Save-time validation for event drafts.
//!
//! # Responsibility
//! - Gate every create/update against the current event list.
//! - Report the first failing rule as a typed, user-presentable error.
//!
//! # Invariants
//! - Rules run in a fixed order and short-circuit: title, required fields,
//!   time order, overlap, duplicate title.
//! - Validation is pure: no logging, no storage access.
//! - The event being edited never conflicts with itself.

use crate::model::event::{
    format_date, format_time, normalize_title, truncate_to_minute, Event, EventDraft, EventId,
    NewEvent,
};
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ValidationResult<T> = Result<T, EventValidationError>;

/// Draft field that must be present before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Date,
    Start,
    End,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// First failing save rule for a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Date, start or end is missing.
    MissingField(RequiredField),
    /// `start >= end`.
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
    /// Half-open range intersects another event on the same date.
    Overlap {
        conflicting_id: EventId,
        start: NaiveTime,
        end: NaiveTime,
    },
    /// Another event on the same date has the same normalized title.
    DuplicateTitle {
        conflicting_id: EventId,
        date: NaiveDate,
    },
}

impl EventValidationError {
    /// Stable machine-readable code for UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::MissingField(_) => "missing_field",
            Self::InvalidTimeRange { .. } => "invalid_time_range",
            Self::Overlap { .. } => "overlap",
            Self::DuplicateTitle { .. } => "duplicate_title",
        }
    }
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title is required."),
            Self::MissingField(field) => write!(f, "The {} field is required.", field.as_str()),
            Self::InvalidTimeRange { .. } => write!(f, "Start time must be before End time."),
            Self::Overlap { start, end, .. } => write!(
                f,
                "This event overlaps with an existing event ({}-{}).",
                format_time(*start),
                format_time(*end)
            ),
            Self::DuplicateTitle { date, .. } => write!(
                f,
                "An event with this title already exists on {}.",
                format_date(*date)
            ),
        }
    }
}

impl Error for EventValidationError {}

/// Mutation a validated draft translates into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventWrite {
    /// Append with a freshly synthesized id.
    Create(NewEvent),
    /// Replace the event with the same id.
    Update(Event),
}

/// Validates `draft` against `existing` and returns the write it implies.
///
/// Times are truncated to minute precision before any comparison so the
/// checked values are exactly what will be persisted.
///
/// # Errors
/// - Returns the first failing [`EventValidationError`] in rule order.
pub fn validate_event(draft: &EventDraft, existing: &[Event]) -> ValidationResult<EventWrite> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(EventValidationError::EmptyTitle);
    }

    let date = draft
        .date
        .ok_or(EventValidationError::MissingField(RequiredField::Date))?;
    let start = draft
        .start
        .map(truncate_to_minute)
        .ok_or(EventValidationError::MissingField(RequiredField::Start))?;
    let end = draft
        .end
        .map(truncate_to_minute)
        .ok_or(EventValidationError::MissingField(RequiredField::End))?;

    if start >= end {
        return Err(EventValidationError::InvalidTimeRange { start, end });
    }

    let same_day = || {
        existing
            .iter()
            .filter(move |event| event.date == date && Some(event.id) != draft.id)
    };

    if let Some(conflict) = same_day().find(|event| event.overlaps(start, end)) {
        return Err(EventValidationError::Overlap {
            conflicting_id: conflict.id,
            start: conflict.start,
            end: conflict.end,
        });
    }

    let title_key = normalize_title(title);
    if let Some(conflict) = same_day().find(|event| event.title_key() == title_key) {
        return Err(EventValidationError::DuplicateTitle {
            conflicting_id: conflict.id,
            date,
        });
    }

    let fields = NewEvent {
        title: title.to_string(),
        date,
        start,
        end,
    };
    Ok(match draft.id {
        Some(id) => EventWrite::Update(fields.with_id(id)),
        None => EventWrite::Create(fields),
    })
}
