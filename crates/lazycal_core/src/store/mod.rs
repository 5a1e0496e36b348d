//! Stateful event container with write-through persistence.
//!
//! # Responsibility
//! - Hold the authoritative event list for one calendar session.
//! - Mirror every mutation to key-value storage.

pub mod event_store;
