//! Shift duration calculation.
//!
//! Computes the raw length of a shift from its clock-in and clock-out times
//! and detects shifts that run past midnight.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, MINUTES_PER_DAY, TimeOfDay};

use super::normalizer::normalize;

/// The raw length of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDuration {
    /// Clock-in in minutes since midnight.
    pub time_in_minutes: u32,
    /// Clock-out in minutes since midnight, as entered.
    pub time_out_minutes: u32,
    /// Minutes from clock-in to clock-out.
    pub total_minutes: u32,
    /// True when clock-out is at or before clock-in.
    pub crosses_midnight: bool,
}

impl ShiftDuration {
    /// Clock-out on the shift's own clock: past 1440 when the shift crosses midnight.
    pub fn adjusted_time_out(&self) -> u32 {
        self.time_in_minutes + self.total_minutes
    }

    /// Worked minutes after subtracting breaks, floored at zero.
    pub fn work_minutes(&self, total_break_minutes: u32) -> u32 {
        self.total_minutes.saturating_sub(total_break_minutes)
    }

    /// True when breaks exceed the shift.
    pub fn is_degenerate(&self, total_break_minutes: u32) -> bool {
        total_break_minutes > self.total_minutes
    }

    pub(crate) fn audit_step(&self, total_break_minutes: u32, step_number: u32) -> AuditStep {
        let work_minutes = self.work_minutes(total_break_minutes);

        let mut reasoning = if self.crosses_midnight {
            format!(
                "Clock-out at or before clock-in: shift crosses midnight, {} minutes in total",
                self.total_minutes
            )
        } else {
            format!(
                "Shift does not cross midnight, {} minutes in total",
                self.total_minutes
            )
        };
        if self.is_degenerate(total_break_minutes) {
            reasoning.push_str(&format!(
                "; {} break minutes exceed shift length, worked time clamped to zero",
                total_break_minutes
            ));
        }

        AuditStep {
            step_number,
            rule_id: "shift_duration".to_string(),
            rule_name: "Shift Duration".to_string(),
            input: serde_json::json!({
                "time_in_minutes": self.time_in_minutes,
                "time_out_minutes": self.time_out_minutes,
                "total_break_minutes": total_break_minutes,
            }),
            output: serde_json::json!({
                "total_minutes": self.total_minutes,
                "work_minutes": work_minutes,
                "crosses_midnight": self.crosses_midnight,
            }),
            reasoning,
        }
    }
}

/// Computes the length of a shift.
///
/// A clock-out at or before the clock-in is taken to be on the following
/// day, so a shift from 9:00 AM to 9:00 AM lasts 24 hours.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeValue`](crate::error::EngineError::InvalidTimeValue)
/// if either time is out of range.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::compute_duration;
///
/// let day = compute_duration(&"7:00 AM".parse().unwrap(), &"3:30 PM".parse().unwrap()).unwrap();
/// assert_eq!(day.total_minutes, 510);
/// assert!(!day.crosses_midnight);
///
/// let night = compute_duration(&"10:00 PM".parse().unwrap(), &"6:00 AM".parse().unwrap()).unwrap();
/// assert_eq!(night.total_minutes, 480);
/// assert!(night.crosses_midnight);
/// ```
pub fn compute_duration(time_in: &TimeOfDay, time_out: &TimeOfDay) -> EngineResult<ShiftDuration> {
    let time_in_minutes = normalize(time_in)?;
    let time_out_minutes = normalize(time_out)?;

    let crosses_midnight = time_out_minutes <= time_in_minutes;
    let end = if crosses_midnight {
        time_out_minutes + MINUTES_PER_DAY
    } else {
        time_out_minutes
    };

    Ok(ShiftDuration {
        time_in_minutes,
        time_out_minutes,
        total_minutes: end - time_in_minutes,
        crosses_midnight,
    })
}
