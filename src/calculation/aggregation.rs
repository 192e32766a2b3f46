//! Day and week aggregation of timesheet entries.
//!
//! Folds entries into Sunday-aligned weekly summaries, per-employee weekly
//! summaries and per-employee daily totals. Every function here is
//! order-independent: shuffling the input gives the same output.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    DailySummary, DayBucket, EmployeeWeeklySummary, StatusCounts, TimesheetEntry, WeeklySummary,
};

/// Returns the Sunday on or before `date`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::week_start_for;
/// use chrono::NaiveDate;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(week_start_for(thursday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// ```
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Groups entries into one summary per Sunday-aligned week, sorted by week.
///
/// Within a week `per_day` is keyed by weekday index (0 = Sunday) and each
/// day's entries are sorted. Hour totals saturate at the `Decimal` bounds.
/// An empty slice gives an empty list.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::summarize;
///
/// assert!(summarize(&[]).is_empty());
/// ```
pub fn summarize(entries: &[TimesheetEntry]) -> Vec<WeeklySummary> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&TimesheetEntry>> = BTreeMap::new();
    for entry in entries {
        weeks
            .entry(week_start_for(entry.date_worked))
            .or_default()
            .push(entry);
    }

    weeks
        .into_iter()
        .map(|(week_start, week_entries)| build_week(week_start, &week_entries))
        .collect()
}

fn build_week(week_start: NaiveDate, entries: &[&TimesheetEntry]) -> WeeklySummary {
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);

    let mut summary = WeeklySummary {
        week_start,
        week_end,
        per_day: BTreeMap::new(),
        total_standard: Decimal::ZERO,
        total_overtime: Decimal::ZERO,
        total_hours: Decimal::ZERO,
        entry_count: 0,
        project_codes: Default::default(),
        employee_ids: Default::default(),
        status_counts: StatusCounts::default(),
    };

    for entry in entries {
        let weekday = entry.date_worked.weekday().num_days_from_sunday();
        let bucket = summary.per_day.entry(weekday).or_insert_with(DayBucket::default);
        bucket.standard_hours = bucket.standard_hours.saturating_add(entry.standard_hours);
        bucket.overtime_hours = bucket.overtime_hours.saturating_add(entry.overtime_hours);
        bucket.total_hours = bucket.total_hours.saturating_add(entry.total_hours());
        bucket.entries.push((*entry).clone());

        summary.total_standard = summary.total_standard.saturating_add(entry.standard_hours);
        summary.total_overtime = summary.total_overtime.saturating_add(entry.overtime_hours);
        summary.entry_count += 1;
        summary.project_codes.insert(entry.project_code.clone());
        summary.employee_ids.insert(entry.employee_id.clone());
        summary.status_counts.record(entry.status);
    }

    summary.total_hours = summary.total_standard.saturating_add(summary.total_overtime);
    for bucket in summary.per_day.values_mut() {
        bucket.entries.sort();
    }

    summary
}

/// Weekly summaries for each employee, sorted by employee id.
pub fn summarize_by_employee(entries: &[TimesheetEntry]) -> Vec<EmployeeWeeklySummary> {
    let mut by_employee: BTreeMap<&str, Vec<TimesheetEntry>> = BTreeMap::new();
    for entry in entries {
        by_employee
            .entry(entry.employee_id.as_str())
            .or_default()
            .push(entry.clone());
    }

    by_employee
        .into_iter()
        .map(|(employee_id, employee_entries)| EmployeeWeeklySummary {
            employee_id: employee_id.to_string(),
            weeks: summarize(&employee_entries),
        })
        .collect()
}

/// Per-employee, per-date totals sorted by employee then date.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::daily_totals;
/// use timesheet_engine::models::{EntryStatus, TimesheetEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = |project: &str, hours: i64| TimesheetEntry {
///     employee_id: "emp_001".to_string(),
///     date_worked: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     project_code: project.to_string(),
///     cost_code: "CC-1".to_string(),
///     extra_value: None,
///     standard_hours: Decimal::from(hours),
///     overtime_hours: Decimal::ZERO,
///     notes: None,
///     status: EntryStatus::Draft,
/// };
///
/// let days = daily_totals(&[entry("P-1", 4), entry("P-2", 5)]);
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].total_hours, Decimal::from(9));
/// assert_eq!(days[0].project_codes.len(), 2);
/// ```
pub fn daily_totals(entries: &[TimesheetEntry]) -> Vec<DailySummary> {
    let mut days: BTreeMap<(&str, NaiveDate), DailySummary> = BTreeMap::new();

    for entry in entries {
        let day = days
            .entry((entry.employee_id.as_str(), entry.date_worked))
            .or_insert_with(|| DailySummary {
                employee_id: entry.employee_id.clone(),
                date: entry.date_worked,
                standard_hours: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
                total_hours: Decimal::ZERO,
                entry_count: 0,
                project_codes: Default::default(),
            });
        day.standard_hours = day.standard_hours.saturating_add(entry.standard_hours);
        day.overtime_hours = day.overtime_hours.saturating_add(entry.overtime_hours);
        day.total_hours = day.total_hours.saturating_add(entry.total_hours());
        day.entry_count += 1;
        day.project_codes.insert(entry.project_code.clone());
    }

    days.into_values().collect()
}

/// Counts entries in each approval state.
pub fn count_by_status(entries: &[TimesheetEntry]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for entry in entries {
        counts.record(entry.status);
    }
    counts
}
