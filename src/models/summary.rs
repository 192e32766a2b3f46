//! Aggregated views over timesheet entries.
//!
//! Produced by the functions in [`calculation::aggregation`](crate::calculation::aggregation)
//! for the weekly review grids and the per-day rollups shown on dashboards.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EntryStatus, TimesheetEntry};

/// Number of entries in each approval state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Entries still in draft.
    pub draft: u32,
    /// Entries waiting for review.
    pub submitted: u32,
    /// Approved entries.
    pub approved: u32,
    /// Rejected entries.
    pub rejected: u32,
}

impl StatusCounts {
    /// Counts one more entry in the given state.
    pub fn record(&mut self, status: EntryStatus) {
        match status {
            EntryStatus::Draft => self.draft += 1,
            EntryStatus::Submitted => self.submitted += 1,
            EntryStatus::Approved => self.approved += 1,
            EntryStatus::Rejected => self.rejected += 1,
        }
    }

    /// Total entries counted.
    pub fn total(&self) -> u32 {
        self.draft + self.submitted + self.approved + self.rejected
    }
}

/// Hours and entries for one weekday of a weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayBucket {
    /// Sum of standard hours on this day.
    pub standard_hours: Decimal,
    /// Sum of overtime hours on this day.
    pub overtime_hours: Decimal,
    /// `standard_hours + overtime_hours`.
    pub total_hours: Decimal,
    /// Entries dated on this day, sorted.
    pub entries: Vec<TimesheetEntry>,
}

/// One Sunday-aligned week of entries.
///
/// `per_day` is keyed by weekday index, 0 for Sunday through 6 for Saturday.
/// Days with no entries have no key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    /// The Sunday the week starts on.
    pub week_start: NaiveDate,
    /// The Saturday the week ends on.
    pub week_end: NaiveDate,
    /// Per-weekday buckets.
    pub per_day: BTreeMap<u32, DayBucket>,
    /// Sum of standard hours over the week.
    pub total_standard: Decimal,
    /// Sum of overtime hours over the week.
    pub total_overtime: Decimal,
    /// `total_standard + total_overtime`.
    pub total_hours: Decimal,
    /// Number of entries in the week.
    pub entry_count: u32,
    /// Distinct project codes in the week.
    pub project_codes: BTreeSet<String>,
    /// Distinct employees in the week.
    pub employee_ids: BTreeSet<String>,
    /// Entries per approval state.
    pub status_counts: StatusCounts,
}

/// One employee's hours on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The employee.
    pub employee_id: String,
    /// The date worked.
    pub date: NaiveDate,
    /// Sum of standard hours.
    pub standard_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// `standard_hours + overtime_hours`.
    pub total_hours: Decimal,
    /// Number of entries on the date.
    pub entry_count: u32,
    /// Distinct project codes charged on the date.
    pub project_codes: BTreeSet<String>,
}

/// Weekly summaries restricted to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeWeeklySummary {
    /// The employee.
    pub employee_id: String,
    /// The employee's weeks, sorted by `week_start`.
    pub weeks: Vec<WeeklySummary>,
}

impl EmployeeWeeklySummary {
    /// Sum of total hours across all of the employee's weeks.
    pub fn total_hours(&self) -> Decimal {
        self.weeks
            .iter()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.total_hours))
    }
}
