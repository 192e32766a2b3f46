//! Shift input model and related types.
//!
//! This module defines the [`ShiftInput`] and [`BreakInterval`] structs that a
//! clock-in/clock-out form submission is turned into before calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// Default daily overtime threshold in minutes (8 hours).
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD_MINUTES: u32 = 480;

/// Default rounding increment in minutes (a quarter hour).
pub const DEFAULT_ROUNDING_INCREMENT_MINUTES: u32 = 15;

/// Represents a break taken during a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// The clock time the break started.
    pub start: TimeOfDay,
    /// The clock time the break ended.
    pub end: TimeOfDay,
}

/// A single clock-in/clock-out submission.
///
/// Created once per form submission and consumed by
/// [`calculate_shift`](crate::calculation::calculate_shift); never mutated
/// afterwards.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{BreakInterval, ShiftInput};
/// use chrono::NaiveDate;
///
/// let shift = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "7:00 AM".parse().unwrap(),
///     "3:30 PM".parse().unwrap(),
/// )
/// .with_break(BreakInterval {
///     start: "12:00 PM".parse().unwrap(),
///     end: "12:30 PM".parse().unwrap(),
/// });
///
/// assert_eq!(shift.breaks.len(), 1);
/// assert_eq!(shift.daily_overtime_threshold_minutes, 480);
/// assert_eq!(shift.rounding_increment_minutes, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// The calendar date the shift started on.
    pub date_worked: NaiveDate,
    /// Clock-in time.
    pub time_in: TimeOfDay,
    /// Clock-out time. Earlier than or equal to `time_in` means the shift
    /// ran past midnight.
    pub time_out: TimeOfDay,
    /// Breaks taken, in the order they were entered.
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    /// Worked minutes per calendar day above which time is overtime.
    #[serde(default = "default_threshold")]
    pub daily_overtime_threshold_minutes: u32,
    /// Granularity that worked time is rounded to.
    #[serde(default = "default_increment")]
    pub rounding_increment_minutes: u32,
}

fn default_threshold() -> u32 {
    DEFAULT_DAILY_OVERTIME_THRESHOLD_MINUTES
}

fn default_increment() -> u32 {
    DEFAULT_ROUNDING_INCREMENT_MINUTES
}

impl ShiftInput {
    /// Creates a shift with no breaks and the default threshold and rounding.
    pub fn new(date_worked: NaiveDate, time_in: TimeOfDay, time_out: TimeOfDay) -> Self {
        Self {
            date_worked,
            time_in,
            time_out,
            breaks: Vec::new(),
            daily_overtime_threshold_minutes: DEFAULT_DAILY_OVERTIME_THRESHOLD_MINUTES,
            rounding_increment_minutes: DEFAULT_ROUNDING_INCREMENT_MINUTES,
        }
    }

    /// Appends a break.
    pub fn with_break(mut self, interval: BreakInterval) -> Self {
        self.breaks.push(interval);
        self
    }

    /// Overrides the daily overtime threshold.
    pub fn with_threshold_minutes(mut self, minutes: u32) -> Self {
        self.daily_overtime_threshold_minutes = minutes;
        self
    }

    /// Overrides the rounding increment.
    pub fn with_rounding_minutes(mut self, minutes: u32) -> Self {
        self.rounding_increment_minutes = minutes;
        self
    }
}
