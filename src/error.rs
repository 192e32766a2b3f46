//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Business-rule violations are never reported through this type; they are
//! returned as [`ValidationError`](crate::models::ValidationError) lists or as
//! soft warnings on a calculation result. `EngineError` is reserved for
//! malformed input shapes and configuration problems.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeValue {
///     hour: 13,
///     minute: 0,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time value 13:00: hour must be 1-12 and minute 0-59"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A 12-hour time had an hour outside 1-12 or a minute outside 0-59.
    #[error("Invalid time value {hour}:{minute:02}: hour must be 1-12 and minute 0-59")]
    InvalidTimeValue {
        /// The hour that was supplied.
        hour: u32,
        /// The minute that was supplied.
        minute: u32,
    },

    /// A time string could not be parsed as `h:mm AM|PM`.
    #[error("Unparseable time '{input}': expected a value like '7:30 AM'")]
    UnparseableTime {
        /// The raw input.
        input: String,
    },

    /// A shift could not be calculated because its shape is inconsistent.
    #[error("Invalid shift on {date}: {message}")]
    InvalidShift {
        /// The date the shift was worked.
        date: chrono::NaiveDate,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending setting.
        field: String,
        /// Why it was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_invalid_time_value_pads_minute() {
        let error = EngineError::InvalidTimeValue { hour: 0, minute: 5 };
        assert_eq!(
            error.to_string(),
            "Invalid time value 0:05: hour must be 1-12 and minute 0-59"
        );
    }

    #[test]
    fn test_unparseable_time_displays_input() {
        let error = EngineError::UnparseableTime {
            input: "25 o'clock".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unparseable time '25 o'clock': expected a value like '7:30 AM'"
        );
    }

    #[test]
    fn test_invalid_shift_displays_date_and_message() {
        let error = EngineError::InvalidShift {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            message: "no following calendar date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid shift on 2026-03-14: no following calendar date"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "rounding_increment_hours".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'rounding_increment_hours': must be positive"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_time() -> EngineResult<()> {
            Err(EngineError::InvalidTimeValue { hour: 13, minute: 0 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
