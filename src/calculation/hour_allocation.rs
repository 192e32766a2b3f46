//! Hour allocation policy.
//!
//! Rounds worked time to the configured increment and splits the rounded
//! hours into standard and overtime portions at the daily threshold.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, HourAllocation};

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default rounding increment in hours (a quarter hour).
pub const DEFAULT_ROUNDING_INCREMENT: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

const MINUTES_PER_HOUR: u32 = 60;

/// Rounds an hour value to two decimal places, half away from zero, and
/// always carries a scale of 2 so serialized values read like `"8.00"`.
pub(crate) fn to_hours(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Converts whole minutes to hours with two decimal places.
pub(crate) fn minutes_to_hours(minutes: u32) -> Decimal {
    to_hours(Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR))
}

/// Rounds an hour value to the nearest multiple of `increment_hours`.
///
/// Values exactly halfway between two multiples round up. A zero or negative
/// increment disables rounding beyond two decimal places.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::{round_to_increment, DEFAULT_ROUNDING_INCREMENT};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// assert_eq!(round_to_increment(dec("7.93"), DEFAULT_ROUNDING_INCREMENT), dec("8.00"));
/// assert_eq!(round_to_increment(dec("7.80"), DEFAULT_ROUNDING_INCREMENT), dec("7.75"));
/// assert_eq!(round_to_increment(dec("7.875"), DEFAULT_ROUNDING_INCREMENT), dec("8.00"));
/// ```
pub fn round_to_increment(hours: Decimal, increment_hours: Decimal) -> Decimal {
    if increment_hours <= Decimal::ZERO {
        return to_hours(hours);
    }

    let units = (hours / increment_hours)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    to_hours(units * increment_hours)
}

/// Splits already-rounded hours at the daily threshold.
///
/// `standard = min(rounded, threshold)` and `overtime = max(0, rounded - threshold)`,
/// so the two always sum to `rounded_hours`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{split_at_threshold, DEFAULT_DAILY_OVERTIME_THRESHOLD};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_at_threshold(Decimal::from_str("10.00").unwrap(), DEFAULT_DAILY_OVERTIME_THRESHOLD);
/// assert_eq!(split.standard_hours, Decimal::from_str("8.00").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("2.00").unwrap());
/// ```
pub fn split_at_threshold(rounded_hours: Decimal, threshold_hours: Decimal) -> HourAllocation {
    let rounded_hours = to_hours(rounded_hours.max(Decimal::ZERO));
    let threshold_hours = threshold_hours.max(Decimal::ZERO);

    let standard_hours = to_hours(rounded_hours.min(threshold_hours));
    let overtime_hours = to_hours(rounded_hours - standard_hours);

    HourAllocation {
        rounded_hours,
        standard_hours,
        overtime_hours,
    }
}

/// Rounds worked minutes and splits them into standard and overtime hours.
///
/// Rounding is done on whole minutes so that increments which are not exact
/// decimal fractions of an hour still round at the true midpoint. An
/// increment of zero leaves the minutes unrounded.
///
/// # Arguments
///
/// * `work_minutes` - Worked minutes after breaks
/// * `rounding_increment_minutes` - Granularity to round to (15 for quarter hours)
/// * `daily_threshold_minutes` - Minutes above which time is overtime
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::allocate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let allocation = allocate(600, 15, 480);
/// assert_eq!(allocation.standard_hours, Decimal::from_str("8.00").unwrap());
/// assert_eq!(allocation.overtime_hours, Decimal::from_str("2.00").unwrap());
/// assert_eq!(allocation.total_hours(), allocation.rounded_hours);
/// ```
pub fn allocate(
    work_minutes: u32,
    rounding_increment_minutes: u32,
    daily_threshold_minutes: u32,
) -> HourAllocation {
    let rounded_minutes = round_minutes(work_minutes, rounding_increment_minutes);
    split_at_threshold(
        minutes_to_hours(rounded_minutes),
        minutes_to_hours(daily_threshold_minutes),
    )
}

/// Rounds minutes to the nearest multiple of the increment, ties upward.
fn round_minutes(minutes: u32, increment: u32) -> u32 {
    if increment == 0 {
        return minutes;
    }
    let minutes = u64::from(minutes);
    let increment = u64::from(increment);
    let units = (2 * minutes + increment) / (2 * increment);
    u32::try_from(units * increment).unwrap_or(u32::MAX)
}

pub(crate) fn allocation_audit_step(
    work_minutes: u32,
    rounding_increment_minutes: u32,
    daily_threshold_minutes: u32,
    allocation: &HourAllocation,
    step_number: u32,
) -> AuditStep {
    let threshold_hours = minutes_to_hours(daily_threshold_minutes);
    let reasoning = if allocation.overtime_hours > Decimal::ZERO {
        format!(
            "{} hours after rounding exceeds {} hour threshold by {} hours",
            allocation.rounded_hours, threshold_hours, allocation.overtime_hours
        )
    } else {
        format!(
            "{} hours after rounding is within {} hour threshold, no overtime",
            allocation.rounded_hours, threshold_hours
        )
    };

    AuditStep {
        step_number,
        rule_id: "hour_allocation".to_string(),
        rule_name: "Hour Allocation".to_string(),
        input: serde_json::json!({
            "work_minutes": work_minutes,
            "rounding_increment_minutes": rounding_increment_minutes,
            "daily_threshold_minutes": daily_threshold_minutes,
        }),
        output: serde_json::json!({
            "rounded_hours": allocation.rounded_hours.to_string(),
            "standard_hours": allocation.standard_hours.to_string(),
            "overtime_hours": allocation.overtime_hours.to_string(),
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ==========================================================================
    // HA-001: quarter-hour rounding
    // ==========================================================================
    #[test]
    fn test_ha_001_rounds_up_to_eight() {
        assert_eq!(round_to_increment(dec("7.93"), dec("0.25")), dec("8.00"));
    }

    #[test]
    fn test_ha_001_rounds_down_to_seven_three_quarters() {
        assert_eq!(round_to_increment(dec("7.80"), dec("0.25")), dec("7.75"));
    }

    #[test]
    fn test_ha_001_midpoint_rounds_up() {
        assert_eq!(round_to_increment(dec("7.125"), dec("0.25")), dec("7.25"));
        assert_eq!(round_minutes(7, 15), 0);
        assert_eq!(round_minutes(8, 15), 15);
        assert_eq!(round_minutes(3, 6), 6);
    }

    #[test]
    fn test_zero_increment_leaves_value() {
        assert_eq!(round_to_increment(dec("7.93"), Decimal::ZERO), dec("7.93"));
        assert_eq!(allocate(475, 0, 480).rounded_hours, dec("7.92"));
    }

    #[test]
    fn test_rounded_values_carry_two_places() {
        let rounded = round_to_increment(dec("8"), dec("0.25"));
        assert_eq!(rounded.to_string(), "8.00");
    }

    // ==========================================================================
    // HA-002: standard/overtime split
    // ==========================================================================
    #[test]
    fn test_ha_002_eight_hours_no_overtime() {
        let allocation = allocate(480, 15, 480);
        assert_eq!(allocation.standard_hours, dec("8.00"));
        assert_eq!(allocation.overtime_hours, dec("0.00"));
    }

    #[test]
    fn test_ha_002_ten_hours_two_overtime() {
        let allocation = allocate(600, 15, 480);
        assert_eq!(allocation.rounded_hours, dec("10.00"));
        assert_eq!(allocation.standard_hours, dec("8.00"));
        assert_eq!(allocation.overtime_hours, dec("2.00"));
    }

    #[test]
    fn test_ha_002_rounding_pushes_into_overtime() {
        // 8h 8m rounds to 8.25
        let allocation = allocate(488, 15, 480);
        assert_eq!(allocation.standard_hours, dec("8.00"));
        assert_eq!(allocation.overtime_hours, dec("0.25"));
    }

    #[test]
    fn test_ha_002_rounding_stays_under_threshold() {
        // 8h 7m rounds to 8.00
        let allocation = allocate(487, 15, 480);
        assert_eq!(allocation.rounded_hours, dec("8.00"));
        assert_eq!(allocation.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_custom_threshold() {
        let allocation = allocate(720, 15, 600);
        assert_eq!(allocation.standard_hours, dec("10.00"));
        assert_eq!(allocation.overtime_hours, dec("2.00"));
    }

    #[test]
    fn test_zero_minutes() {
        let allocation = allocate(0, 15, 480);
        assert_eq!(allocation, HourAllocation {
            rounded_hours: Decimal::ZERO,
            standard_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
        });
    }

    #[test]
    fn test_split_negative_hours_floor_at_zero() {
        let split = split_at_threshold(dec("-1"), dec("8"));
        assert_eq!(split.rounded_hours, Decimal::ZERO);
        assert_eq!(split.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_reasoning() {
        let allocation = allocate(600, 15, 480);
        let step = allocation_audit_step(600, 15, 480, &allocation, 5);

        assert_eq!(step.rule_id, "hour_allocation");
        assert_eq!(step.output["overtime_hours"], "2.00");
        assert!(step.reasoning.contains("exceeds"));

        let allocation = allocate(300, 15, 480);
        let step = allocation_audit_step(300, 15, 480, &allocation, 5);
        assert!(step.reasoning.contains("no overtime"));
    }

    proptest! {
        #[test]
        fn prop_split_sums_to_rounded(
            minutes in 0u32..=2880,
            increment in prop::sample::select(vec![1u32, 5, 6, 10, 15, 30, 60]),
            threshold in 0u32..=960,
        ) {
            let allocation = allocate(minutes, increment, threshold);
            prop_assert_eq!(allocation.total_hours(), allocation.rounded_hours);
            prop_assert!(allocation.standard_hours >= Decimal::ZERO);
            prop_assert!(allocation.overtime_hours >= Decimal::ZERO);
            prop_assert!(allocation.standard_hours <= minutes_to_hours(threshold));
        }

        #[test]
        fn prop_quarter_hour_results_are_multiples(minutes in 0u32..=2880) {
            let allocation = allocate(minutes, 15, 480);
            let quarter = dec("0.25");
            prop_assert_eq!(allocation.standard_hours % quarter, Decimal::ZERO);
            prop_assert_eq!(allocation.overtime_hours % quarter, Decimal::ZERO);
        }
    }
}
