//! Calculation result models for the Timesheet Engine.
//!
//! This module contains the [`ShiftCalculationResult`] type and the structures
//! it is assembled from: per-break details, hour allocations, soft warnings and
//! the audit steps recorded while the shift was calculated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A standard/overtime split of a rounded number of hours.
///
/// Invariant: `standard_hours + overtime_hours == rounded_hours`.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::HourAllocation;
/// use rust_decimal::Decimal;
///
/// let allocation = HourAllocation {
///     rounded_hours: Decimal::new(1000, 2),
///     standard_hours: Decimal::new(800, 2),
///     overtime_hours: Decimal::new(200, 2),
/// };
/// assert_eq!(allocation.total_hours(), allocation.rounded_hours);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HourAllocation {
    /// Worked hours after rounding to the configured increment.
    pub rounded_hours: Decimal,
    /// Hours up to the daily threshold.
    pub standard_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
}

impl HourAllocation {
    /// Returns `standard_hours + overtime_hours`.
    pub fn total_hours(&self) -> Decimal {
        self.standard_hours + self.overtime_hours
    }
}

/// Hours attributed to one calendar date.
///
/// A shift that stays within one day produces one of these; a shift that
/// crosses midnight produces two, one per date, each of which the caller may
/// persist as its own timesheet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedAllocation {
    /// The calendar date the hours belong to.
    pub date: NaiveDate,
    /// Worked minutes falling on this date, before rounding.
    pub work_minutes: u32,
    /// The rounded standard/overtime split for this date.
    pub allocation: HourAllocation,
}

/// Something wrong with a single break that did not stop the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakIssue {
    /// The break ends at or before it starts; counted as zero minutes.
    NonPositiveDuration,
    /// The break overlaps an earlier break; both are still counted in full.
    Overlaps {
        /// Index of the earlier break it overlaps.
        other_index: usize,
    },
    /// The break is not inside the clock-in/clock-out window.
    OutsideShift,
}

/// The normalized form of one submitted break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDetail {
    /// Position of the break in the submitted list.
    pub index: usize,
    /// Break start in minutes since midnight.
    pub start_minutes: u32,
    /// Break end in minutes since midnight.
    pub end_minutes: u32,
    /// Minutes the break contributes to the total (zero when invalid).
    pub duration_minutes: u32,
    /// Non-fatal problems detected with this break.
    #[serde(default)]
    pub issues: Vec<BreakIssue>,
}

impl BreakDetail {
    /// Returns true when the break contributed its full duration.
    pub fn is_valid(&self) -> bool {
        !self.issues.contains(&BreakIssue::NonPositiveDuration)
    }
}

/// Identifies the kind of soft warning raised during a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Break time exceeded shift time; worked minutes were clamped to zero.
    DegenerateShift,
    /// A break ended at or before it started.
    InvalidBreak,
    /// Two breaks overlapped and were both counted.
    OverlappingBreak,
    /// A break fell outside the shift window.
    BreakOutsideShift,
}

/// A warning generated during calculation.
///
/// Warnings indicate input the engine tolerated but the form may want to
/// point out to the user. They never block a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: WarningCode,
    /// A human-readable description of the warning.
    pub message: String,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of calculating one shift.
///
/// Derived and immutable; one instance per [`ShiftInput`](super::ShiftInput).
/// The result is not an entry: the caller decides whether to persist one or
/// two timesheet entries from [`day_allocations`](Self::day_allocations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCalculationResult {
    /// The date the shift started on.
    pub date_worked: NaiveDate,
    /// Clock-in in minutes since midnight.
    pub time_in_minutes: u32,
    /// Clock-out in minutes since midnight (not adjusted for crossing).
    pub time_out_minutes: u32,
    /// Minutes between clock-in and clock-out.
    pub total_minutes: u32,
    /// Sum of all valid break durations.
    pub total_break_minutes: u32,
    /// `total_minutes - total_break_minutes`, floored at zero.
    pub work_minutes: u32,
    /// Worked hours rounded to the configured increment.
    pub rounded_hours: Decimal,
    /// Hours up to the daily threshold.
    pub standard_hours: Decimal,
    /// Hours beyond the daily threshold.
    pub overtime_hours: Decimal,
    /// Whether clock-out fell on the following calendar date.
    pub crosses_midnight: bool,
    /// One entry per submitted break, in submission order.
    pub break_details: Vec<BreakDetail>,
    /// The origin date, when the shift crosses midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_one_date: Option<NaiveDate>,
    /// Rounded hours worked before midnight, when the shift crosses midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_one_hours: Option<Decimal>,
    /// The following date, when the shift crosses midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_two_date: Option<NaiveDate>,
    /// Rounded hours worked after midnight, when the shift crosses midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_two_hours: Option<Decimal>,
    /// Per-date allocations: one for a same-day shift, two for a crossing one.
    pub day_allocations: Vec<DatedAllocation>,
    /// Soft warnings raised while calculating.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
    /// Ordered record of each calculation stage.
    #[serde(default)]
    pub audit_steps: Vec<AuditStep>,
}

impl ShiftCalculationResult {
    /// Returns `standard_hours + overtime_hours`.
    pub fn total_hours(&self) -> Decimal {
        self.standard_hours + self.overtime_hours
    }

    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
