//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and the event store into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod calendar_service;
