//! Month grid generation.
//!
//! # Invariants
//! - Leading placeholders equal the weekday of the 1st (Sunday = 0).
//! - Day cells are consecutive, start at day 1 and end at the last day.
//! - Day cells carry noon of their date so DST shifts never move a cell.

use super::DAYS_PER_WEEK;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// One slot of a month grid: a concrete noon date-time or an empty
/// placeholder before the 1st.
pub type GridCell = Option<NaiveDateTime>;

/// Sunday-first month layout for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    first_day: NaiveDate,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Month number, 1-based.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Leading placeholders followed by one cell per day of the month.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn leading_placeholders(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_none()).count()
    }

    pub fn days_in_month(&self) -> usize {
        self.cells.len() - self.leading_placeholders()
    }

    /// Cell count rounded up to whole weeks, for renderers that pad the tail.
    pub fn padded_len(&self) -> usize {
        self.cells.len().div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK
    }

    /// Cells split into Sunday-first rows; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Concrete dates of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().flatten().map(NaiveDateTime::date)
    }
}

/// Builds the month grid for the month containing `reference`.
pub fn generate_month_grid(reference: NaiveDate) -> MonthGrid {
    let first_day = reference - Duration::days(i64::from(reference.day0()));
    let leading = first_day.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<GridCell> = vec![None; leading];
    cells.extend(
        first_day
            .iter_days()
            .take_while(|day| day.month() == first_day.month())
            .filter_map(|day| day.and_hms_opt(12, 0, 0))
            .map(Some),
    );

    MonthGrid { first_day, cells }
}
