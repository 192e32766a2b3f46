//! Configuration types for the hours engine.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from the YAML settings file. Every value has a default, so a
//! settings file only needs to name what it changes.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DEFAULT_BULK_ENTRY_CAP, DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_ROUNDING_INCREMENT,
    DEFAULT_SINGLE_ENTRY_CAP,
};
use crate::error::{EngineError, EngineResult};

/// Rounding and overtime policy applied to calculated shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftPolicy {
    /// Hours per calendar day above which time is overtime.
    pub daily_overtime_threshold_hours: Decimal,
    /// Granularity worked time is rounded to, in hours.
    pub rounding_increment_hours: Decimal,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            daily_overtime_threshold_hours: DEFAULT_DAILY_OVERTIME_THRESHOLD,
            rounding_increment_hours: DEFAULT_ROUNDING_INCREMENT,
        }
    }
}

/// Daily hour caps applied by the entry forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Cap for the single-entry form.
    pub single_entry_daily_cap_hours: Decimal,
    /// Cap for the bulk-entry grid.
    pub bulk_entry_daily_cap_hours: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            single_entry_daily_cap_hours: DEFAULT_SINGLE_ENTRY_CAP,
            bulk_entry_daily_cap_hours: DEFAULT_BULK_ENTRY_CAP,
        }
    }
}

/// All engine settings.
///
/// # Example
///
/// ```
/// use timesheet_engine::config::EngineSettings;
///
/// let settings: EngineSettings = serde_yaml::from_str("shift:\n  daily_overtime_threshold_hours: 10\n").unwrap();
/// settings.validate().unwrap();
/// assert_eq!(settings.daily_overtime_threshold_minutes().unwrap(), 600);
/// assert_eq!(settings.rounding_increment_minutes().unwrap(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Shift calculation policy.
    pub shift: ShiftPolicy,
    /// Entry validation limits.
    pub validation: ValidationLimits,
}

impl EngineSettings {
    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> EngineResult<()> {
        require_positive(
            "shift.daily_overtime_threshold_hours",
            self.shift.daily_overtime_threshold_hours,
        )?;
        require_positive(
            "shift.rounding_increment_hours",
            self.shift.rounding_increment_hours,
        )?;
        require_positive(
            "validation.single_entry_daily_cap_hours",
            self.validation.single_entry_daily_cap_hours,
        )?;
        require_positive(
            "validation.bulk_entry_daily_cap_hours",
            self.validation.bulk_entry_daily_cap_hours,
        )?;

        self.daily_overtime_threshold_minutes()?;
        self.rounding_increment_minutes()?;
        Ok(())
    }

    /// The overtime threshold in whole minutes.
    pub fn daily_overtime_threshold_minutes(&self) -> EngineResult<u32> {
        whole_minutes(
            "shift.daily_overtime_threshold_hours",
            self.shift.daily_overtime_threshold_hours,
        )
    }

    /// The rounding increment in whole minutes.
    pub fn rounding_increment_minutes(&self) -> EngineResult<u32> {
        whole_minutes(
            "shift.rounding_increment_hours",
            self.shift.rounding_increment_hours,
        )
    }
}

fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("must be greater than zero, got {value}"),
        });
    }
    Ok(())
}

fn whole_minutes(field: &str, hours: Decimal) -> EngineResult<u32> {
    let minutes = hours
        .checked_mul(Decimal::from(60))
        .ok_or_else(|| EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("{hours} hours is out of range"),
        })?;
    if !minutes.fract().is_zero() {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("{hours} hours is not a whole number of minutes"),
        });
    }
    minutes.to_u32().ok_or_else(|| EngineError::InvalidConfig {
        field: field.to_string(),
        message: format!("{hours} hours is out of range"),
    })
}
