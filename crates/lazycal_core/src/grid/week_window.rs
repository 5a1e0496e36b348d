//! Sunday-first week windows.
//!
//! Week arithmetic is checked: offsets that would leave chrono's supported
//! date range yield `None` instead of a window.

use super::DAYS_PER_WEEK;
use chrono::{Datelike, Days, NaiveDate};

/// Seven consecutive dates starting on a Sunday.
pub type WeekWindow = [NaiveDate; DAYS_PER_WEEK];

/// Returns the Sunday on or before `date`.
///
/// `None` only for dates in the first partial week of the supported range.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(
        date.weekday().num_days_from_sunday(),
    )))
}

/// Returns the week `offset` weeks away from the week containing `reference`.
///
/// Returns `None` when any date of the window falls outside the supported
/// date range.
pub fn week_window(reference: NaiveDate, offset: i32) -> Option<WeekWindow> {
    let start = week_start(reference)?;
    let shift = Days::new(u64::from(offset.unsigned_abs()) * DAYS_PER_WEEK as u64);
    let start = if offset >= 0 {
        start.checked_add_days(shift)?
    } else {
        start.checked_sub_days(shift)?
    };

    // The last day bounds the rest of the window.
    start.checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))?;
    Some(std::array::from_fn(|index| start + Days::new(index as u64)))
}

/// Returns whether any date of `window` lies in the month containing `anchor`.
pub fn window_touches_month(window: &[NaiveDate], anchor: NaiveDate) -> bool {
    window
        .iter()
        .any(|date| date.year() == anchor.year() && date.month() == anchor.month())
}
