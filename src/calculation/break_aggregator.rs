//! Break aggregation.
//!
//! Normalizes every submitted break, sums the valid durations and records
//! what was wrong with the rest. Problems with a break never stop the
//! calculation; they are attached to the break's [`BreakDetail`] instead.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, BreakDetail, BreakInterval, BreakIssue, MINUTES_PER_DAY};

use super::normalizer::normalize;

/// The result of aggregating a shift's breaks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreakAggregation {
    /// Sum of every break's `duration_minutes`.
    pub total_break_minutes: u32,
    /// One detail per submitted break, in submission order.
    pub details: Vec<BreakDetail>,
}

impl BreakAggregation {
    /// Returns true if any break carries an issue.
    pub fn has_issues(&self) -> bool {
        self.details.iter().any(|d| !d.issues.is_empty())
    }

    /// Flags breaks that do not lie inside the shift window.
    ///
    /// `time_out_minutes` is the clock-out already moved past 1440 for a
    /// crossing shift. Break times before clock-in are treated as falling on
    /// the next day when the shift crosses midnight. The total is unchanged.
    pub(crate) fn flag_outside_shift(
        &mut self,
        time_in_minutes: u32,
        time_out_minutes: u32,
        crosses_midnight: bool,
    ) {
        let on_shift_clock = |minutes: u32| {
            if crosses_midnight && minutes < time_in_minutes {
                minutes + MINUTES_PER_DAY
            } else {
                minutes
            }
        };

        for detail in &mut self.details {
            if detail.duration_minutes == 0 {
                continue;
            }
            let start = on_shift_clock(detail.start_minutes);
            let end = on_shift_clock(detail.end_minutes);
            let inside = start >= time_in_minutes && end <= time_out_minutes && start < end;
            if !inside {
                detail.issues.push(BreakIssue::OutsideShift);
            }
        }
    }

    pub(crate) fn audit_step(&self, step_number: u32) -> AuditStep {
        let flagged = self.details.iter().filter(|d| !d.issues.is_empty()).count();
        AuditStep {
            step_number,
            rule_id: "break_aggregation".to_string(),
            rule_name: "Break Aggregation".to_string(),
            input: serde_json::json!({
                "break_count": self.details.len(),
            }),
            output: serde_json::json!({
                "total_break_minutes": self.total_break_minutes,
                "flagged_breaks": flagged,
            }),
            reasoning: if self.details.is_empty() {
                "No breaks recorded".to_string()
            } else {
                format!(
                    "{} break(s) totalling {} minutes, {} flagged",
                    self.details.len(),
                    self.total_break_minutes,
                    flagged
                )
            },
        }
    }
}

/// Normalizes and sums a list of breaks.
///
/// Each break contributes `end - start` minutes. A break that ends at or
/// before its start contributes zero and is flagged
/// [`BreakIssue::NonPositiveDuration`]. Overlapping breaks are not merged:
/// each contributes its own duration and the later one is flagged
/// [`BreakIssue::Overlaps`] against every earlier break it intersects.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeValue`](crate::error::EngineError::InvalidTimeValue)
/// if any break time is out of range.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::aggregate_breaks;
/// use timesheet_engine::models::BreakInterval;
///
/// let breaks = vec![
///     BreakInterval { start: "10:00 AM".parse().unwrap(), end: "10:15 AM".parse().unwrap() },
///     BreakInterval { start: "12:00 PM".parse().unwrap(), end: "12:30 PM".parse().unwrap() },
/// ];
///
/// let aggregation = aggregate_breaks(&breaks).unwrap();
/// assert_eq!(aggregation.total_break_minutes, 45);
/// assert!(!aggregation.has_issues());
/// ```
pub fn aggregate_breaks(breaks: &[BreakInterval]) -> EngineResult<BreakAggregation> {
    let mut details: Vec<BreakDetail> = Vec::with_capacity(breaks.len());

    for (index, interval) in breaks.iter().enumerate() {
        let start_minutes = normalize(&interval.start)?;
        let end_minutes = normalize(&interval.end)?;

        let mut issues = Vec::new();
        let duration_minutes = if end_minutes > start_minutes {
            end_minutes - start_minutes
        } else {
            issues.push(BreakIssue::NonPositiveDuration);
            0
        };

        if duration_minutes > 0 {
            for earlier in details.iter().filter(|d| d.duration_minutes > 0) {
                if start_minutes < earlier.end_minutes && earlier.start_minutes < end_minutes {
                    issues.push(BreakIssue::Overlaps {
                        other_index: earlier.index,
                    });
                }
            }
        }

        details.push(BreakDetail {
            index,
            start_minutes,
            end_minutes,
            duration_minutes,
            issues,
        });
    }

    let total_break_minutes = details.iter().map(|d| d.duration_minutes).sum();

    Ok(BreakAggregation {
        total_break_minutes,
        details,
    })
}
