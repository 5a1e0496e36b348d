//! Calendar event domain model.
//!
//! # Responsibility
//! - Define the persisted event record and the editable draft a form holds.
//! - Own the text formats used on the wire and in form fields
//!   (`yyyy-mm-dd` dates, zero-padded `HH:MM` times).
//!
//! # Invariants
//! - `start < end` for every persisted event; events never cross midnight.
//! - `id` is unique within one event list.
//! - Times carry minute precision only.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable event identifier: the creation timestamp in epoch milliseconds.
pub type EventId = i64;

/// Default start time offered by a new draft.
pub const DEFAULT_START_HOUR: u32 = 9;
/// Default end time offered by a new draft.
pub const DEFAULT_END_HOUR: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time regex"));

/// Field-level parse error for raw form/wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFieldError {
    /// Date text is not a real `yyyy-mm-dd` calendar date.
    InvalidDate(String),
    /// Time text is not a zero-padded 24h `HH:MM` value.
    InvalidTime { field: &'static str, value: String },
    /// Persisted record has `end <= start`.
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },
}

impl Display for EventFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected yyyy-mm-dd"),
            Self::InvalidTime { field, value } => {
                write!(f, "invalid {field} time `{value}`; expected HH:MM")
            }
            Self::InvalidTimeRange { start, end } => write!(
                f,
                "end ({}) must be after start ({})",
                format_time(*end),
                format_time(*start)
            ),
        }
    }
}

impl Error for EventFieldError {}

/// Parses a strict ISO `yyyy-mm-dd` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, EventFieldError> {
    let trimmed = value.trim();
    if !DATE_RE.is_match(trimmed) {
        return Err(EventFieldError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EventFieldError::InvalidDate(trimmed.to_string()))
}

/// Parses a strict zero-padded `HH:MM` time.
///
/// `field` names the form field in the returned error.
pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, EventFieldError> {
    let trimmed = value.trim();
    if !TIME_RE.is_match(trimmed) {
        return Err(EventFieldError::InvalidTime {
            field,
            value: trimmed.to_string(),
        });
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| EventFieldError::InvalidTime {
        field,
        value: trimmed.to_string(),
    })
}

/// Formats a date as `yyyy-mm-dd`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a time as zero-padded `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Drops seconds and sub-second precision.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(time)
}

mod hhmm {
    use super::{format_time, parse_time};
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time("stored", &raw).map_err(de::Error::custom)
    }
}

mod ymd {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(de::Error::custom)
    }
}

#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    title: String,
    #[serde(with = "ymd")]
    date: NaiveDate,
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventFieldError;

    fn try_from(value: EventRecord) -> Result<Self, Self::Error> {
        if value.start >= value.end {
            return Err(EventFieldError::InvalidTimeRange {
                start: value.start,
                end: value.end,
            });
        }
        Ok(Self {
            id: value.id,
            title: value.title,
            date: value.date,
            start: value.start,
            end: value.end,
        })
    }
}

/// Persisted calendar event.
///
/// Wire shape: `{"id":1718000000000,"title":"Standup","date":"2024-06-10",
/// "start":"09:00","end":"09:30"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(with = "ymd")]
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl Event {
    /// Local date-time the event starts at; used as the sort key.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    /// Trimmed, lowercased title used for per-day duplicate detection.
    pub fn title_key(&self) -> String {
        normalize_title(&self.title)
    }

    /// Returns whether `[start, end)` intersects this event's half-open range.
    ///
    /// Intersecting means: `start` falls inside this event, `end` falls inside
    /// this event, or `[start, end)` covers it entirely. Touching endpoints do
    /// not intersect.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        let start_inside = start >= self.start && start < self.end;
        let end_inside = end > self.start && end <= self.end;
        let covers = start <= self.start && end >= self.end;
        start_inside || end_inside || covers
    }
}

/// Validated field set for an event that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl NewEvent {
    /// Attaches a stable id, producing a persistable [`Event`].
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            start: self.start,
            end: self.end,
        }
    }
}

/// Editable form state for creating or editing one event.
///
/// `id == None` means create; `Some(id)` means edit of that event.
/// Missing date/time fields are kept as `None` so validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDraft {
    pub id: Option<EventId>,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl EventDraft {
    /// Creates a blank draft on `date` with the default 09:00-10:00 slot.
    pub fn new_on(date: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            date: Some(date),
            start: NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0),
            end: NaiveTime::from_hms_opt(DEFAULT_END_HOUR, 0, 0),
        }
    }

    /// Creates an edit draft pre-filled from an existing event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title.clone(),
            date: Some(event.date),
            start: Some(event.start),
            end: Some(event.end),
        }
    }

    /// Builds a draft from raw form text.
    ///
    /// Blank date/time fields become `None`; non-blank malformed fields are
    /// rejected with the offending field named.
    ///
    /// # Errors
    /// - Returns [`EventFieldError`] when a non-blank field cannot be parsed.
    pub fn from_form(
        id: Option<EventId>,
        title: &str,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<Self, EventFieldError> {
        Ok(Self {
            id,
            title: title.to_string(),
            date: non_blank(date).map(parse_date).transpose()?,
            start: non_blank(start)
                .map(|value| parse_time("start", value))
                .transpose()?,
            end: non_blank(end)
                .map(|value| parse_time("end", value))
                .transpose()?,
        })
    }

    /// Returns whether saving this draft edits an existing event.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// Trims and lowercases a title for case-insensitive comparison.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
