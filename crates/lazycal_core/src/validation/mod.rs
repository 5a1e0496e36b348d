//! Pure validation rules for calendar mutations.
//!
//! # Responsibility
//! - Decide whether a draft may be saved, independent of storage and views.
//!
//! # Invariants
//! - Validation never mutates state; callers apply the returned write.

pub mod event_validator;
