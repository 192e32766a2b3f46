//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from a YAML file.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::{EntryMode, ValidationContext};
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftInput;

use super::types::EngineSettings;

/// Loads and provides access to engine settings.
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/settings.yaml")?;
/// println!("Overtime after {} hours", loader.settings().shift.daily_overtime_threshold_hours);
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads settings from a YAML file and validates them.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g., "./config/settings.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates settings from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        // An empty document means "all defaults".
        let settings = if content.trim().is_empty() {
            EngineSettings::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?
        };

        Self::from_settings(settings)
    }

    /// Wraps already-built settings after validating them.
    pub fn from_settings(settings: EngineSettings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Builds a validation context for the given form and date.
    pub fn validation_context(&self, mode: EntryMode, today: NaiveDate) -> ValidationContext {
        let limits = &self.settings.validation;
        let context = match mode {
            EntryMode::Single => ValidationContext::single_entry(today)
                .with_daily_cap(limits.single_entry_daily_cap_hours),
            EntryMode::Bulk => ValidationContext::bulk_entry(today)
                .with_daily_cap(limits.bulk_entry_daily_cap_hours),
        };
        context.with_rounding_increment(self.settings.shift.rounding_increment_hours)
    }

    /// Applies the configured threshold and rounding increment to a shift.
    pub fn apply_shift_policy(&self, shift: ShiftInput) -> EngineResult<ShiftInput> {
        Ok(shift
            .with_threshold_minutes(self.settings.daily_overtime_threshold_minutes()?)
            .with_rounding_minutes(self.settings.rounding_increment_minutes()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/settings.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings(), &EngineSettings::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/settings.yaml") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = ConfigLoader::from_yaml_str("shift: [not, a, map]");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = ConfigLoader::from_yaml_str("").unwrap();
        assert_eq!(loader.settings(), &EngineSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = ConfigLoader::from_yaml_str("shift:\n  rounding_increment_hours: 0\n");
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_validation_context_uses_configured_caps() {
        let loader = ConfigLoader::from_yaml_str(
            "validation:\n  single_entry_daily_cap_hours: 12\n  bulk_entry_daily_cap_hours: 20\n",
        )
        .unwrap();

        let single = loader.validation_context(EntryMode::Single, today());
        assert_eq!(single.daily_cap_hours, dec("12"));
        assert_eq!(single.mode, EntryMode::Single);
        assert_eq!(single.today, today());

        let bulk = loader.validation_context(EntryMode::Bulk, today());
        assert_eq!(bulk.daily_cap_hours, dec("20"));
        assert_eq!(bulk.rounding_increment_hours, dec("0.25"));
    }

    #[test]
    fn test_apply_shift_policy() {
        let loader = ConfigLoader::from_yaml_str(
            "shift:\n  daily_overtime_threshold_hours: 10\n  rounding_increment_hours: 0.1\n",
        )
        .unwrap();

        let shift = ShiftInput::new(
            today(),
            "7:00 AM".parse().unwrap(),
            "3:00 PM".parse().unwrap(),
        );
        let shift = loader.apply_shift_policy(shift).unwrap();

        assert_eq!(shift.daily_overtime_threshold_minutes, 600);
        assert_eq!(shift.rounding_increment_minutes, 6);
    }
}
