//! Entry validation.
//!
//! Checks a candidate entry against the business rules payroll export relies
//! on and reports every violation at once as a list of field-level
//! [`ValidationError`]s. Validation never fails with an `Err`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    BreakInterval, EntryForm, ShiftInput, TimeOfDay, TimesheetEntry, ValidationError,
};

use super::hour_allocation::DEFAULT_ROUNDING_INCREMENT;
use super::normalizer::normalize;
use super::shift_duration::compute_duration;

/// Daily hour cap applied to single-entry forms.
pub const DEFAULT_SINGLE_ENTRY_CAP: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Daily hour cap applied to bulk-grid forms.
pub const DEFAULT_BULK_ENTRY_CAP: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Which form an entry was submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// One entry for one employee.
    #[default]
    Single,
    /// A grid row applied to several employees.
    Bulk,
}

/// Parameters the validator needs from its caller.
///
/// `today` is injected so that validation stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// The current date; entries dated after it are rejected.
    pub today: NaiveDate,
    /// Maximum `standard + overtime` hours for one entry.
    pub daily_cap_hours: Decimal,
    /// Hours must be a multiple of this value.
    pub rounding_increment_hours: Decimal,
    /// Single or bulk entry.
    pub mode: EntryMode,
}

impl ValidationContext {
    /// Context for the single-entry form: 16 hour cap, quarter-hour increments.
    pub fn single_entry(today: NaiveDate) -> Self {
        Self {
            today,
            daily_cap_hours: DEFAULT_SINGLE_ENTRY_CAP,
            rounding_increment_hours: DEFAULT_ROUNDING_INCREMENT,
            mode: EntryMode::Single,
        }
    }

    /// Context for the bulk-entry grid: 24 hour cap, quarter-hour increments.
    pub fn bulk_entry(today: NaiveDate) -> Self {
        Self {
            today,
            daily_cap_hours: DEFAULT_BULK_ENTRY_CAP,
            rounding_increment_hours: DEFAULT_ROUNDING_INCREMENT,
            mode: EntryMode::Bulk,
        }
    }

    /// Overrides the daily cap.
    pub fn with_daily_cap(mut self, hours: Decimal) -> Self {
        self.daily_cap_hours = hours;
        self
    }

    /// Overrides the rounding increment.
    pub fn with_rounding_increment(mut self, hours: Decimal) -> Self {
        self.rounding_increment_hours = hours;
        self
    }
}

/// Validates a candidate entry and returns every rule it breaks.
///
/// An empty list means the entry is valid. Running validation twice on the
/// same input gives the same list.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{validate, ValidationContext};
/// use timesheet_engine::models::EntryForm;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
/// let form = EntryForm {
///     employee_ids: vec!["emp_001".to_string()],
///     date_worked: NaiveDate::from_ymd_opt(2026, 1, 15),
///     project_code: String::new(),
///     cost_code: "CC-200".to_string(),
///     standard_hours: Decimal::from(20),
///     ..Default::default()
/// };
///
/// let errors = validate(&form, &ValidationContext::single_entry(today));
/// let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
/// assert_eq!(fields, vec!["project_code", "total_hours"]);
/// ```
pub fn validate(form: &EntryForm, context: &ValidationContext) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match form.date_worked {
        None => errors.push(ValidationError::new("date_worked", "Date worked is required")),
        Some(date) if date > context.today => errors.push(ValidationError::new(
            "date_worked",
            "Date worked cannot be in the future",
        )),
        Some(_) => {}
    }

    let selected = form
        .employee_ids
        .iter()
        .filter(|id| !id.trim().is_empty())
        .count();
    match context.mode {
        EntryMode::Single if selected == 0 => {
            errors.push(ValidationError::new("employee_id", "Employee is required"))
        }
        EntryMode::Single if form.employee_ids.len() > 1 => errors.push(ValidationError::new(
            "employee_id",
            "Only one employee can be selected for a single entry",
        )),
        EntryMode::Bulk if selected == 0 => errors.push(ValidationError::new(
            "employee_ids",
            "Select at least one employee",
        )),
        _ => {}
    }

    if form.project_code.trim().is_empty() {
        errors.push(ValidationError::new("project_code", "Project is required"));
    }
    if form.cost_code.trim().is_empty() {
        errors.push(ValidationError::new("cost_code", "Cost code is required"));
    }

    let total = form.total_hours();
    if total <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "total_hours",
            "Total hours must be greater than zero",
        ));
    } else if total > context.daily_cap_hours {
        errors.push(ValidationError::new(
            "total_hours",
            format!(
                "Total hours cannot exceed {} per day",
                context.daily_cap_hours.normalize()
            ),
        ));
    }

    check_hours(
        &mut errors,
        "standard_hours",
        "Standard hours",
        form.standard_hours,
        context.rounding_increment_hours,
    );
    check_hours(
        &mut errors,
        "overtime_hours",
        "Overtime hours",
        form.overtime_hours,
        context.rounding_increment_hours,
    );

    debug!(
        mode = ?context.mode,
        error_count = errors.len(),
        "Entry validated"
    );

    errors
}

fn check_hours(
    errors: &mut Vec<ValidationError>,
    field: &str,
    label: &str,
    hours: Decimal,
    increment: Decimal,
) {
    if hours < Decimal::ZERO {
        errors.push(ValidationError::new(
            field,
            format!("{label} cannot be negative"),
        ));
    } else if increment > Decimal::ZERO
        && !hours.checked_rem(increment).is_some_and(|r| r.is_zero())
    {
        errors.push(ValidationError::new(
            field,
            format!(
                "{label} must be in increments of {}",
                increment.normalize()
            ),
        ));
    }
}

/// Validates an existing entry that is about to be edited.
///
/// Only draft entries may be edited; any other status yields a single
/// `status` error without checking the remaining fields.
pub fn validate_for_edit(
    entry: &TimesheetEntry,
    context: &ValidationContext,
) -> Vec<ValidationError> {
    if !entry.status.is_editable() {
        return vec![ValidationError::new(
            "status",
            "Only draft entries can be edited",
        )];
    }
    validate(&EntryForm::from_entry(entry), context)
}

/// Validates a form and expands it into one draft entry per selected employee.
///
/// # Errors
///
/// Returns the validation errors if the form breaks any rule.
pub fn build_entries(
    form: &EntryForm,
    context: &ValidationContext,
) -> Result<Vec<TimesheetEntry>, Vec<ValidationError>> {
    let errors = validate(form, context);
    if !errors.is_empty() {
        return Err(errors);
    }

    form.clone()
        .into_entries()
        .ok_or_else(|| vec![ValidationError::new("date_worked", "Date worked is required")])
}

/// Checks a raw shift before it is calculated.
///
/// Reports out-of-range clock times, breaks of zero length, breaks that run
/// past midnight, and breaks that add up to more than the shift itself.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::validate_shift;
/// use timesheet_engine::models::{BreakInterval, ShiftInput};
/// use chrono::NaiveDate;
///
/// let shift = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     "10:00 PM".parse().unwrap(),
///     "6:00 AM".parse().unwrap(),
/// )
/// .with_break(BreakInterval {
///     start: "11:45 PM".parse().unwrap(),
///     end: "12:15 AM".parse().unwrap(),
/// });
///
/// let errors = validate_shift(&shift);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, "breaks[0]");
/// ```
pub fn validate_shift(shift: &ShiftInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_time(&mut errors, "time_in", "Clock-in time", &shift.time_in);
    check_time(&mut errors, "time_out", "Clock-out time", &shift.time_out);

    let mut break_minutes: u32 = 0;
    for (index, interval) in shift.breaks.iter().enumerate() {
        if let Some(minutes) = check_break(&mut errors, index, interval) {
            break_minutes += minutes;
        }
    }

    if shift.rounding_increment_minutes == 0 {
        errors.push(ValidationError::new(
            "rounding_increment_minutes",
            "Rounding increment must be greater than zero",
        ));
    }

    if let Ok(duration) = compute_duration(&shift.time_in, &shift.time_out) {
        if duration.is_degenerate(break_minutes) {
            errors.push(ValidationError::new(
                "breaks",
                "Total break time exceeds the shift length",
            ));
        }
    }

    errors
}

fn check_time(errors: &mut Vec<ValidationError>, field: &str, label: &str, time: &TimeOfDay) {
    if normalize(time).is_err() {
        errors.push(ValidationError::new(
            field,
            format!("{label} {}:{:02} is not a valid time", time.hour, time.minute),
        ));
    }
}

/// Returns the break's length when it is usable.
fn check_break(
    errors: &mut Vec<ValidationError>,
    index: usize,
    interval: &BreakInterval,
) -> Option<u32> {
    let start_field = format!("breaks[{index}].start");
    let end_field = format!("breaks[{index}].end");
    let field = format!("breaks[{index}]");

    let start = normalize(&interval.start);
    let end = normalize(&interval.end);
    if start.is_err() {
        check_time(errors, &start_field, "Break start", &interval.start);
    }
    if end.is_err() {
        check_time(errors, &end_field, "Break end", &interval.end);
    }

    let (start, end) = (start.ok()?, end.ok()?);
    if end == start {
        errors.push(ValidationError::new(
            field,
            "Break must be longer than zero minutes",
        ));
        None
    } else if end < start {
        errors.push(ValidationError::new(
            field,
            "Break cannot run past midnight; enter it as two breaks",
        ));
        None
    } else {
        Some(end - start)
    }
}
