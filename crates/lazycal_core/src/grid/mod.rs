//! Pure calendar grid generators.
//!
//! # Responsibility
//! - Turn a reference date into month cells or a week of dates.
//!
//! # Invariants
//! - Weeks start on Sunday everywhere.
//! - Generators are stateless and never consult the wall clock.

pub mod month_grid;
pub mod week_window;

/// Number of days in one grid row.
pub const DAYS_PER_WEEK: usize = 7;
