//! View-mode selection and previous/next navigation rules.
//!
//! # Responsibility
//! - Track the active view mode, the selected day and the week offset.
//! - Decide when previous/next navigation is enabled for each mode.
//!
//! # Invariants
//! - Day and week navigation never leave reach of the month containing
//!   `today`; the selected date's own month is not consulted.
//! - Month mode has no previous/next navigation.
//! - Switching modes does not reset the selected day or week offset.

use crate::grid::month_grid::{generate_month_grid, MonthGrid};
use crate::grid::week_window::{week_window, window_touches_month, WeekWindow};
use chrono::{Datelike, Duration, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Mutually exclusive calendar view modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// Error returned when parsing an unknown view mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownViewMode(pub String);

impl Display for UnknownViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown view mode `{}`; expected day|week|month", self.0)
    }
}

impl Error for UnknownViewMode {}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

/// Position of a day relative to today, as shown in the empty-day message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
    Other,
}

impl RelativeDay {
    pub fn between(date: NaiveDate, today: NaiveDate) -> Self {
        match (date - today).num_days() {
            0 => Self::Today,
            1 => Self::Tomorrow,
            -1 => Self::Yesterday,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Yesterday => "yesterday",
            Self::Other => "this day",
        }
    }
}

/// Long heading for a day, e.g. `Monday, June 10, 2024`.
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Calendar navigation state owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    mode: ViewMode,
    today: NaiveDate,
    selected_date: NaiveDate,
    week_offset: i32,
}

impl NavigationState {
    /// Starts in month mode with `today` selected and no week offset.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::default(),
            today,
            selected_date: today,
            week_offset: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Selects a day directly, e.g. from a month cell.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Signed number of weeks away from the week containing today.
    pub fn week_offset(&self) -> i32 {
        self.week_offset
    }

    /// Week currently shown in week mode.
    ///
    /// `None` only when `today` sits at the edge of the supported date range.
    pub fn visible_week(&self) -> Option<WeekWindow> {
        week_window(self.today, self.week_offset)
    }

    /// Month grid for the month containing the selected day.
    pub fn visible_month(&self) -> MonthGrid {
        generate_month_grid(self.selected_date)
    }

    pub fn relative_day(&self) -> RelativeDay {
        RelativeDay::between(self.selected_date, self.today)
    }

    pub fn can_go_previous(&self) -> bool {
        self.step_allowed(-1)
    }

    pub fn can_go_next(&self) -> bool {
        self.step_allowed(1)
    }

    /// Moves one step back in the active mode.
    ///
    /// Returns `false` and leaves state unchanged when navigation is disabled.
    pub fn go_previous(&mut self) -> bool {
        self.step(-1)
    }

    /// Moves one step forward in the active mode.
    ///
    /// Returns `false` and leaves state unchanged when navigation is disabled.
    pub fn go_next(&mut self) -> bool {
        self.step(1)
    }

    fn step(&mut self, direction: i32) -> bool {
        if !self.step_allowed(direction) {
            return false;
        }

        match self.mode {
            ViewMode::Day => {
                if let Some(target) = self.day_target(direction) {
                    self.selected_date = target;
                }
            }
            ViewMode::Week => self.week_offset += direction,
            ViewMode::Month => {}
        }
        true
    }

    fn step_allowed(&self, direction: i32) -> bool {
        match self.mode {
            ViewMode::Day => self.day_step_allowed(direction),
            ViewMode::Week => self.week_step_allowed(direction),
            ViewMode::Month => false,
        }
    }

    fn day_target(&self, direction: i32) -> Option<NaiveDate> {
        self.selected_date
            .checked_add_signed(Duration::days(i64::from(direction)))
    }

    fn day_step_allowed(&self, direction: i32) -> bool {
        self.day_target(direction).is_some_and(|target| {
            target.year() == self.today.year() && target.month() == self.today.month()
        })
    }

    fn week_step_allowed(&self, direction: i32) -> bool {
        self.week_offset
            .checked_add(direction)
            .and_then(|offset| week_window(self.today, offset))
            .is_some_and(|target| window_touches_month(&target, self.today))
    }
}
