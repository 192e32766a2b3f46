//! Midnight split resolution.
//!
//! A shift that runs past midnight is paid on two calendar dates. This module
//! apportions the shift's worked time between the origin date and the next
//! date so that the two parts add up to exactly the rounded shift total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DatedAllocation, MINUTES_PER_DAY, ShiftInput};

use super::break_aggregator::BreakAggregation;
use super::hour_allocation::{allocate, minutes_to_hours, split_at_threshold};
use super::shift_duration::ShiftDuration;

/// How a crossing shift's hours divide between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidnightSplit {
    /// Hours worked on the origin date, before midnight.
    pub day_one: DatedAllocation,
    /// Hours worked on the following date, after midnight.
    pub day_two: DatedAllocation,
}

impl MidnightSplit {
    /// The origin date.
    pub fn day_one_date(&self) -> chrono::NaiveDate {
        self.day_one.date
    }

    /// Rounded hours on the origin date.
    pub fn day_one_hours(&self) -> Decimal {
        self.day_one.allocation.rounded_hours
    }

    /// The date after the origin date.
    pub fn day_two_date(&self) -> chrono::NaiveDate {
        self.day_two.date
    }

    /// Rounded hours on the following date.
    pub fn day_two_hours(&self) -> Decimal {
        self.day_two.allocation.rounded_hours
    }

    /// Sum of both days' rounded hours.
    pub fn total_hours(&self) -> Decimal {
        self.day_one_hours() + self.day_two_hours()
    }

    /// Both allocations in date order.
    pub fn allocations(&self) -> [DatedAllocation; 2] {
        [self.day_one, self.day_two]
    }

    pub(crate) fn audit_step(&self, step_number: u32) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "midnight_split".to_string(),
            rule_name: "Midnight Split".to_string(),
            input: serde_json::json!({
                "day_one_work_minutes": self.day_one.work_minutes,
                "day_two_work_minutes": self.day_two.work_minutes,
            }),
            output: serde_json::json!({
                "day_one_date": self.day_one.date.to_string(),
                "day_one_hours": self.day_one_hours().to_string(),
                "day_one_standard_hours": self.day_one.allocation.standard_hours.to_string(),
                "day_one_overtime_hours": self.day_one.allocation.overtime_hours.to_string(),
                "day_two_date": self.day_two.date.to_string(),
                "day_two_hours": self.day_two_hours().to_string(),
                "day_two_standard_hours": self.day_two.allocation.standard_hours.to_string(),
                "day_two_overtime_hours": self.day_two.allocation.overtime_hours.to_string(),
            }),
            reasoning: format!(
                "Shift crosses midnight: {} hours on {} and {} hours on {}",
                self.day_one_hours(),
                self.day_one.date,
                self.day_two_hours(),
                self.day_two.date
            ),
        }
    }
}

/// Apportions a crossing shift's hours to the origin date and the next date.
///
/// Returns `Ok(None)` when the shift does not cross midnight.
///
/// Worked minutes before midnight are `1440 - time_in` less the breaks that
/// start at or after clock-in; the remainder of the shift's worked minutes
/// falls on the next date. The origin date's minutes are rounded on their
/// own, and the next date receives the rest of the rounded shift total, so
/// `day_one_hours + day_two_hours` always equals the rounded total. Each side
/// is then split into standard and overtime hours with the shift's threshold.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShift`] if the origin date has no successor.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{aggregate_breaks, compute_duration, split_across_midnight};
/// use timesheet_engine::models::ShiftInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "10:00 PM".parse().unwrap(),
///     "6:00 AM".parse().unwrap(),
/// );
/// let duration = compute_duration(&shift.time_in, &shift.time_out).unwrap();
/// let breaks = aggregate_breaks(&shift.breaks).unwrap();
///
/// let split = split_across_midnight(&shift, &duration, &breaks).unwrap().unwrap();
/// assert_eq!(split.day_one_hours(), Decimal::new(200, 2));
/// assert_eq!(split.day_two_hours(), Decimal::new(600, 2));
/// assert_eq!(split.day_two_date(), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// ```
pub fn split_across_midnight(
    shift: &ShiftInput,
    duration: &ShiftDuration,
    breaks: &BreakAggregation,
) -> EngineResult<Option<MidnightSplit>> {
    if !duration.crosses_midnight {
        return Ok(None);
    }

    let day_two_date = shift
        .date_worked
        .succ_opt()
        .ok_or_else(|| EngineError::InvalidShift {
            date: shift.date_worked,
            message: "shift crosses midnight but the following date is out of range".to_string(),
        })?;

    let work_minutes = duration.work_minutes(breaks.total_break_minutes);

    let day_one_break_minutes: u32 = breaks
        .details
        .iter()
        .filter(|d| d.start_minutes >= duration.time_in_minutes)
        .map(|d| d.duration_minutes)
        .sum();
    let day_one_work = (MINUTES_PER_DAY - duration.time_in_minutes)
        .saturating_sub(day_one_break_minutes)
        .min(work_minutes);
    let day_two_work = work_minutes - day_one_work;

    let increment = shift.rounding_increment_minutes;
    let threshold = shift.daily_overtime_threshold_minutes;
    let threshold_hours = minutes_to_hours(threshold);

    let total_rounded = allocate(work_minutes, increment, threshold).rounded_hours;
    let day_one_rounded = allocate(day_one_work, increment, threshold)
        .rounded_hours
        .min(total_rounded);
    let day_two_rounded = total_rounded - day_one_rounded;

    Ok(Some(MidnightSplit {
        day_one: DatedAllocation {
            date: shift.date_worked,
            work_minutes: day_one_work,
            allocation: split_at_threshold(day_one_rounded, threshold_hours),
        },
        day_two: DatedAllocation {
            date: day_two_date,
            work_minutes: day_two_work,
            allocation: split_at_threshold(day_two_rounded, threshold_hours),
        },
    }))
}
