//! Field-level validation errors.

use serde::{Deserialize, Serialize};

/// A single business-rule violation on one form field.
///
/// Validation returns a list of these rather than failing, so a form can show
/// every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidationError {
    /// The form field the error belongs to (e.g. `project_code`, `breaks[1].end`).
    pub field: String,
    /// A message suitable for showing next to the field.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_field() {
        let error = ValidationError::new("cost_code", "Cost code is required");
        assert_eq!(error.to_string(), "cost_code: Cost code is required");
    }

    #[test]
    fn test_serialization() {
        let error = ValidationError::new("date_worked", "Date cannot be in the future");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(
            json,
            r#"{"field":"date_worked","message":"Date cannot be in the future"}"#
        );
    }
}
