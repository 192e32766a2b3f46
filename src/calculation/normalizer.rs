//! Time value normalization.
//!
//! Converts a twelve-hour [`TimeOfDay`] into minutes since midnight so that
//! every later stage can work with plain integers.

use crate::error::{EngineError, EngineResult};
use crate::models::{Period, TimeOfDay};

/// Converts a twelve-hour clock time to minutes since midnight.
///
/// `12:xx AM` maps into the first hour of the day and `12:xx PM` into the
/// hour after noon; every other hour is `hour * 60`, plus 720 for PM. The
/// result is always in `0..=1439`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeValue`] if the hour is not 1-12 or the
/// minute is not 0-59.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::normalize;
/// use timesheet_engine::models::{Period, TimeOfDay};
///
/// let midnight = TimeOfDay { hour: 12, minute: 0, period: Period::Am };
/// let noon = TimeOfDay { hour: 12, minute: 0, period: Period::Pm };
/// let evening = TimeOfDay { hour: 7, minute: 30, period: Period::Pm };
///
/// assert_eq!(normalize(&midnight).unwrap(), 0);
/// assert_eq!(normalize(&noon).unwrap(), 720);
/// assert_eq!(normalize(&evening).unwrap(), 1170);
/// ```
pub fn normalize(time: &TimeOfDay) -> EngineResult<u32> {
    if !time.is_in_range() {
        return Err(EngineError::InvalidTimeValue {
            hour: time.hour,
            minute: time.minute,
        });
    }

    let hour_24 = match (time.hour, time.period) {
        (12, Period::Am) => 0,
        (12, Period::Pm) => 12,
        (h, Period::Am) => h,
        (h, Period::Pm) => h + 12,
    };

    Ok(hour_24 * 60 + time.minute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MINUTES_PER_DAY;
    use proptest::prelude::*;

    fn time(hour: u32, minute: u32, period: Period) -> TimeOfDay {
        TimeOfDay {
            hour,
            minute,
            period,
        }
    }

    // ==========================================================================
    // TN-001: midnight and noon anchors
    // ==========================================================================
    #[test]
    fn test_tn_001_twelve_am_is_zero() {
        assert_eq!(normalize(&time(12, 0, Period::Am)).unwrap(), 0);
        assert_eq!(normalize(&time(12, 59, Period::Am)).unwrap(), 59);
    }

    #[test]
    fn test_tn_001_twelve_pm_is_noon() {
        assert_eq!(normalize(&time(12, 0, Period::Pm)).unwrap(), 720);
        assert_eq!(normalize(&time(12, 30, Period::Pm)).unwrap(), 750);
    }

    // ==========================================================================
    // TN-002: ordinary hours
    // ==========================================================================
    #[test]
    fn test_tn_002_morning_and_evening() {
        assert_eq!(normalize(&time(7, 0, Period::Am)).unwrap(), 420);
        assert_eq!(normalize(&time(3, 30, Period::Pm)).unwrap(), 930);
        assert_eq!(normalize(&time(11, 59, Period::Pm)).unwrap(), 1439);
        assert_eq!(normalize(&time(1, 0, Period::Am)).unwrap(), 60);
    }

    // ==========================================================================
    // TN-003: out-of-range values
    // ==========================================================================
    #[test]
    fn test_tn_003_hour_zero_rejected() {
        assert!(matches!(
            normalize(&time(0, 15, Period::Am)),
            Err(EngineError::InvalidTimeValue {
                hour: 0,
                minute: 15
            })
        ));
    }

    #[test]
    fn test_tn_003_hour_thirteen_rejected() {
        assert!(normalize(&time(13, 0, Period::Pm)).is_err());
    }

    #[test]
    fn test_tn_003_minute_sixty_rejected() {
        assert!(matches!(
            normalize(&time(4, 60, Period::Pm)),
            Err(EngineError::InvalidTimeValue { minute: 60, .. })
        ));
    }

    #[test]
    fn test_inverse_of_from_minutes() {
        for minutes in [0, 1, 59, 60, 719, 720, 721, 1200, 1439] {
            let time = TimeOfDay::from_minutes(minutes).unwrap();
            assert_eq!(normalize(&time).unwrap(), minutes);
        }
    }

    fn any_valid_time() -> impl Strategy<Value = TimeOfDay> {
        (1u32..=12, 0u32..=59, prop::bool::ANY).prop_map(|(hour, minute, pm)| {
            time(hour, minute, if pm { Period::Pm } else { Period::Am })
        })
    }

    proptest! {
        #[test]
        fn prop_normalization_is_total_over_valid_times(t in any_valid_time()) {
            let minutes = normalize(&t).unwrap();
            prop_assert!(minutes < MINUTES_PER_DAY);
            prop_assert_eq!(TimeOfDay::from_minutes(minutes).unwrap(), t);
        }

        #[test]
        fn prop_out_of_range_hour_is_rejected(hour in 13u32..100, minute in 0u32..=59) {
            prop_assert!(normalize(&time(hour, minute, Period::Am)).is_err());
        }
    }
}
