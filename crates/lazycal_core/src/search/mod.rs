//! Title search over the in-memory event list.
//!
//! # Responsibility
//! - Filter events for every view by the current search text.
//! - Keep result ordering identical across views.

pub mod event_filter;
