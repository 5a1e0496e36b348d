//! Calendar domain model.
//!
//! # Responsibility
//! - Define the canonical event record shared by every view and the store.
//! - Keep wire/form text formats next to the types they describe.
//!
//! # Invariants
//! - Every persisted event is identified by a unique `EventId`.
//! - Deletion removes the record; there are no tombstones.

pub mod event;
