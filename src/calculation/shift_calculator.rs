//! Shift calculation pipeline.
//!
//! Runs a [`ShiftInput`] through normalization, break aggregation, duration,
//! hour allocation and, for overnight shifts, the midnight split, and records
//! an audit step for every stage.

use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, BreakIssue, DatedAllocation, ShiftCalculationResult, ShiftInput,
    WarningCode,
};

use super::break_aggregator::{BreakAggregation, aggregate_breaks};
use super::hour_allocation::{allocate, allocation_audit_step};
use super::midnight_split::split_across_midnight;
use super::shift_duration::{ShiftDuration, compute_duration};

/// Calculates standard and overtime hours for one shift.
///
/// Business-rule problems never fail the calculation: breaks that are
/// reversed, overlapping or outside the shift, and breaks that consume the
/// whole shift, are reported as [`AuditWarning`]s on the result.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeValue`](crate::error::EngineError::InvalidTimeValue)
/// if any clock time is out of range, and
/// [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift) if an
/// overnight shift starts on the last representable date.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::calculate_shift;
/// use timesheet_engine::models::{BreakInterval, ShiftInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
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
/// let result = calculate_shift(&shift).unwrap();
/// assert_eq!(result.work_minutes, 480);
/// assert_eq!(result.standard_hours, Decimal::new(800, 2));
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// assert!(!result.crosses_midnight);
/// ```
pub fn calculate_shift(shift: &ShiftInput) -> EngineResult<ShiftCalculationResult> {
    let mut audit_steps = Vec::new();
    let mut step = 1;

    let duration = compute_duration(&shift.time_in, &shift.time_out)?;
    audit_steps.push(normalization_step(shift, &duration, step));
    step += 1;

    let mut breaks = aggregate_breaks(&shift.breaks)?;
    breaks.flag_outside_shift(
        duration.time_in_minutes,
        duration.adjusted_time_out(),
        duration.crosses_midnight,
    );
    audit_steps.push(breaks.audit_step(step));
    step += 1;

    audit_steps.push(duration.audit_step(breaks.total_break_minutes, step));
    step += 1;

    let work_minutes = duration.work_minutes(breaks.total_break_minutes);
    let allocation = allocate(
        work_minutes,
        shift.rounding_increment_minutes,
        shift.daily_overtime_threshold_minutes,
    );
    audit_steps.push(allocation_audit_step(
        work_minutes,
        shift.rounding_increment_minutes,
        shift.daily_overtime_threshold_minutes,
        &allocation,
        step,
    ));
    step += 1;

    let split = split_across_midnight(shift, &duration, &breaks)?;
    let day_allocations = match &split {
        Some(split) => {
            audit_steps.push(split.audit_step(step));
            split.allocations().to_vec()
        }
        None => vec![DatedAllocation {
            date: shift.date_worked,
            work_minutes,
            allocation,
        }],
    };

    let warnings = collect_warnings(&duration, &breaks);
    for warning in &warnings {
        warn!(
            date_worked = %shift.date_worked,
            code = ?warning.code,
            "{}",
            warning.message
        );
    }

    debug!(
        date_worked = %shift.date_worked,
        total_minutes = duration.total_minutes,
        work_minutes,
        rounded_hours = %allocation.rounded_hours,
        standard_hours = %allocation.standard_hours,
        overtime_hours = %allocation.overtime_hours,
        crosses_midnight = duration.crosses_midnight,
        "Shift calculated"
    );

    Ok(ShiftCalculationResult {
        date_worked: shift.date_worked,
        time_in_minutes: duration.time_in_minutes,
        time_out_minutes: duration.time_out_minutes,
        total_minutes: duration.total_minutes,
        total_break_minutes: breaks.total_break_minutes,
        work_minutes,
        rounded_hours: allocation.rounded_hours,
        standard_hours: allocation.standard_hours,
        overtime_hours: allocation.overtime_hours,
        crosses_midnight: duration.crosses_midnight,
        break_details: breaks.details,
        day_one_date: split.map(|s| s.day_one_date()),
        day_one_hours: split.map(|s| s.day_one_hours()),
        day_two_date: split.map(|s| s.day_two_date()),
        day_two_hours: split.map(|s| s.day_two_hours()),
        day_allocations,
        warnings,
        audit_steps,
    })
}

fn normalization_step(shift: &ShiftInput, duration: &ShiftDuration, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "time_normalization".to_string(),
        rule_name: "Time Normalization".to_string(),
        input: serde_json::json!({
            "time_in": shift.time_in.to_string(),
            "time_out": shift.time_out.to_string(),
        }),
        output: serde_json::json!({
            "time_in_minutes": duration.time_in_minutes,
            "time_out_minutes": duration.time_out_minutes,
        }),
        reasoning: format!(
            "{} is minute {} and {} is minute {} of the day",
            shift.time_in, duration.time_in_minutes, shift.time_out, duration.time_out_minutes
        ),
    }
}

fn collect_warnings(duration: &ShiftDuration, breaks: &BreakAggregation) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    for detail in &breaks.details {
        for issue in &detail.issues {
            let (code, message) = match issue {
                BreakIssue::NonPositiveDuration => (
                    WarningCode::InvalidBreak,
                    format!(
                        "Break {} ends at or before it starts and was counted as zero minutes",
                        detail.index + 1
                    ),
                ),
                BreakIssue::Overlaps { other_index } => (
                    WarningCode::OverlappingBreak,
                    format!(
                        "Break {} overlaps break {}; both were counted in full",
                        detail.index + 1,
                        other_index + 1
                    ),
                ),
                BreakIssue::OutsideShift => (
                    WarningCode::BreakOutsideShift,
                    format!("Break {} is outside the shift window", detail.index + 1),
                ),
            };
            warnings.push(AuditWarning { code, message });
        }
    }

    if duration.is_degenerate(breaks.total_break_minutes) {
        warnings.push(AuditWarning {
            code: WarningCode::DegenerateShift,
            message: format!(
                "{} break minutes exceed the {} minute shift; worked time set to zero",
                breaks.total_break_minutes, duration.total_minutes
            ),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{BreakInterval, Period, TimeOfDay};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn shift(time_in: &str, time_out: &str) -> ShiftInput {
        ShiftInput::new(
            make_date("2026-01-15"),
            time_in.parse().unwrap(),
            time_out.parse().unwrap(),
        )
    }

    fn brk(start: &str, end: &str) -> BreakInterval {
        BreakInterval {
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
        }
    }

    // ==========================================================================
    // SC-001: 7:00 AM to 3:30 PM with a half-hour lunch
    // ==========================================================================
    #[test]
    fn test_sc_001_standard_day() {
        let s = shift("7:00 AM", "3:30 PM").with_break(brk("12:00 PM", "12:30 PM"));
        let result = calculate_shift(&s).unwrap();

        assert_eq!(result.total_minutes, 510);
        assert_eq!(result.total_break_minutes, 30);
        assert_eq!(result.work_minutes, 480);
        assert_eq!(result.standard_hours, dec("8.00"));
        assert_eq!(result.overtime_hours, dec("0.00"));
        assert!(!result.crosses_midnight);
        assert!(result.warnings.is_empty());
        assert!(result.day_one_date.is_none());
        assert_eq!(result.day_allocations.len(), 1);
        assert_eq!(result.day_allocations[0].date, make_date("2026-01-15"));
    }

    // ==========================================================================
    // SC-002: ten worked hours
    // ==========================================================================
    #[test]
    fn test_sc_002_overtime_split() {
        let result = calculate_shift(&shift("6:00 AM", "4:00 PM")).unwrap();

        assert_eq!(result.work_minutes, 600);
        assert_eq!(result.standard_hours, dec("8.00"));
        assert_eq!(result.overtime_hours, dec("2.00"));
        assert_eq!(result.total_hours(), result.rounded_hours);
    }

    // ==========================================================================
    // SC-003: 10:00 PM to 6:00 AM
    // ==========================================================================
    #[test]
    fn test_sc_003_overnight() {
        let result = calculate_shift(&shift("10:00 PM", "6:00 AM")).unwrap();

        assert!(result.crosses_midnight);
        assert_eq!(result.total_minutes, 480);
        assert_eq!(result.day_one_date, Some(make_date("2026-01-15")));
        assert_eq!(result.day_one_hours, Some(dec("2.00")));
        assert_eq!(result.day_two_date, Some(make_date("2026-01-16")));
        assert_eq!(result.day_two_hours, Some(dec("6.00")));
        assert_eq!(result.rounded_hours, dec("8.00"));
        assert_eq!(result.day_allocations.len(), 2);
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let result = calculate_shift(&shift("10:00 PM", "6:00 AM")).unwrap();
        let rule_ids: Vec<&str> = result
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "time_normalization",
                "break_aggregation",
                "shift_duration",
                "hour_allocation",
                "midnight_split"
            ]
        );
        for (i, step) in result.audit_steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_same_day_has_no_split_step() {
        let result = calculate_shift(&shift("9:00 AM", "5:00 PM")).unwrap();
        assert_eq!(result.audit_steps.len(), 4);
    }

    // ==========================================================================
    // SC-004: breaks consume the shift
    // ==========================================================================
    #[test]
    fn test_sc_004_degenerate_shift_warning() {
        let s = shift("9:00 AM", "10:00 AM")
            .with_break(brk("9:00 AM", "9:45 AM"))
            .with_break(brk("9:30 AM", "10:00 AM"));
        let result = calculate_shift(&s).unwrap();

        assert_eq!(result.total_break_minutes, 75);
        assert_eq!(result.work_minutes, 0);
        assert_eq!(result.rounded_hours, Decimal::ZERO);
        assert!(result.has_warning(WarningCode::DegenerateShift));
        assert!(result.has_warning(WarningCode::OverlappingBreak));
    }

    #[test]
    fn test_invalid_and_outside_breaks_warn() {
        let s = shift("7:00 AM", "3:30 PM")
            .with_break(brk("12:30 PM", "12:00 PM"))
            .with_break(brk("5:00 PM", "5:15 PM"));
        let result = calculate_shift(&s).unwrap();

        assert_eq!(result.total_break_minutes, 15);
        assert!(result.has_warning(WarningCode::InvalidBreak));
        assert!(result.has_warning(WarningCode::BreakOutsideShift));
        assert!(!result.has_warning(WarningCode::DegenerateShift));
    }

    #[test]
    fn test_invalid_time_is_error() {
        let mut s = shift("7:00 AM", "3:30 PM");
        s.time_out = TimeOfDay {
            hour: 15,
            minute: 30,
            period: Period::Pm,
        };

        assert!(matches!(
            calculate_shift(&s),
            Err(EngineError::InvalidTimeValue { hour: 15, .. })
        ));
    }

    #[test]
    fn test_quarter_hour_rounding_applied() {
        // 7h 56m
        let result = calculate_shift(&shift("7:00 AM", "2:56 PM")).unwrap();
        assert_eq!(result.work_minutes, 476);
        assert_eq!(result.rounded_hours, dec("8.00"));
    }

    #[test]
    fn test_custom_policy() {
        let s = shift("6:00 AM", "5:00 PM")
            .with_threshold_minutes(600)
            .with_rounding_minutes(30);
        let result = calculate_shift(&s).unwrap();

        assert_eq!(result.standard_hours, dec("10.00"));
        assert_eq!(result.overtime_hours, dec("1.00"));
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let s = shift("10:00 PM", "6:00 AM").with_break(brk("2:00 AM", "2:30 AM"));
        assert_eq!(calculate_shift(&s).unwrap(), calculate_shift(&s).unwrap());
    }
}
