//! Core domain logic for LazyCal.
//! This crate is the single source of truth for calendar invariants.

pub mod db;
pub mod grid;
pub mod logging;
pub mod model;
pub mod nav;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;
pub mod validation;

pub use grid::month_grid::{generate_month_grid, GridCell, MonthGrid};
pub use grid::week_window::{week_start, week_window, window_touches_month, WeekWindow};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventDraft, EventFieldError, EventId, NewEvent};
pub use nav::navigation::{day_heading, NavigationState, RelativeDay, ViewMode};
pub use repo::kv_repo::{KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use search::event_filter::{events_on, filter_events, EventQuery};
pub use service::calendar_service::{CalendarError, CalendarService};
pub use store::event_store::{decode_events, encode_events, EventStore, EVENTS_STORAGE_KEY};
pub use validation::event_validator::{
    validate_event, EventValidationError, EventWrite, RequiredField, ValidationResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
