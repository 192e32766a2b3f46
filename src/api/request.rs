//! Request types for the Timesheet Engine API.
//!
//! This module defines the JSON request structures for the shift, entry
//! validation and summary endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::EntryMode;
use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{BreakInterval, EntryForm, ShiftInput, TimeOfDay, TimesheetEntry};

/// A clock time as sent by a form: either `"7:30 AM"` or
/// `{"hour": 7, "minute": 30, "period": "AM"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    /// A time string such as `"7:30 AM"`.
    Text(String),
    /// A structured time.
    Parts(TimeOfDay),
}

impl TimeInput {
    /// Resolves the input to a [`TimeOfDay`].
    ///
    /// Strings are parsed here; structured values are range-checked later,
    /// when the shift is calculated.
    pub fn resolve(&self) -> EngineResult<TimeOfDay> {
        match self {
            TimeInput::Text(text) => text.parse(),
            TimeInput::Parts(time) => Ok(*time),
        }
    }
}

/// Break information in a shift request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRequest {
    /// When the break started.
    pub start: TimeInput,
    /// When the break ended.
    pub end: TimeInput,
}

/// Request body for the `/shifts/calculate` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// The date the shift started on.
    pub date_worked: NaiveDate,
    /// Clock-in time.
    pub time_in: TimeInput,
    /// Clock-out time.
    pub time_out: TimeInput,
    /// Breaks taken during the shift.
    #[serde(default)]
    pub breaks: Vec<BreakRequest>,
    /// Overrides the configured overtime threshold for this shift.
    #[serde(default)]
    pub daily_overtime_threshold_hours: Option<Decimal>,
    /// Overrides the configured rounding increment for this shift.
    #[serde(default)]
    pub rounding_increment_hours: Option<Decimal>,
}

impl ShiftRequest {
    /// Builds the engine input, applying any policy overrides on top of the
    /// server settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a time cannot be parsed or an override is not a
    /// usable value.
    pub fn into_shift_input(self, settings: &EngineSettings) -> EngineResult<ShiftInput> {
        let mut settings = *settings;
        if let Some(hours) = self.daily_overtime_threshold_hours {
            settings.shift.daily_overtime_threshold_hours = hours;
        }
        if let Some(hours) = self.rounding_increment_hours {
            settings.shift.rounding_increment_hours = hours;
        }
        settings.validate()?;

        let breaks = self
            .breaks
            .iter()
            .map(|b| {
                Ok(BreakInterval {
                    start: b.start.resolve()?,
                    end: b.end.resolve()?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let mut shift = ShiftInput::new(
            self.date_worked,
            self.time_in.resolve()?,
            self.time_out.resolve()?,
        )
        .with_threshold_minutes(settings.daily_overtime_threshold_minutes()?)
        .with_rounding_minutes(settings.rounding_increment_minutes()?);
        shift.breaks = breaks;

        Ok(shift)
    }
}

/// Request body for the `/entries/validate` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateEntryRequest {
    /// The candidate entry.
    pub entry: EntryForm,
    /// Which form the entry came from.
    #[serde(default)]
    pub mode: EntryMode,
    /// The date to validate against; defaults to the server's current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/summaries/weekly` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// The entries to summarize.
    #[serde(default)]
    pub entries: Vec<TimesheetEntry>,
}

/// How `/summaries/weekly` groups its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryGrouping {
    /// One summary per week across all employees.
    #[default]
    Week,
    /// Weekly summaries per employee.
    Employee,
}

/// Query parameters for `/summaries/weekly`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SummaryQuery {
    /// Grouping; weeks when absent.
    #[serde(default)]
    pub by: SummaryGrouping,
}
