//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod shift;
mod summary;
mod time_of_day;
mod timesheet_entry;
mod validation;

pub use calculation_result::{
    AuditStep, AuditWarning, BreakDetail, BreakIssue, DatedAllocation, HourAllocation,
    ShiftCalculationResult, WarningCode,
};
pub use shift::{
    BreakInterval, DEFAULT_DAILY_OVERTIME_THRESHOLD_MINUTES, DEFAULT_ROUNDING_INCREMENT_MINUTES,
    ShiftInput,
};
pub use summary::{DailySummary, DayBucket, EmployeeWeeklySummary, StatusCounts, WeeklySummary};
pub use time_of_day::{MINUTES_PER_DAY, Period, TimeOfDay};
pub use timesheet_entry::{EntryForm, EntryStatus, TimesheetEntry};
pub use validation::ValidationError;
