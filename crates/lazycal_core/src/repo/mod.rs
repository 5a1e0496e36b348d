//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract the event store writes through.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Repositories store opaque strings; encoding is the store's concern.

pub mod kv_repo;
