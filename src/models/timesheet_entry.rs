//! Timesheet entry model and the form it is built from.
//!
//! A [`TimesheetEntry`] is one record of hours worked by one employee on one
//! date against one project/cost-code combination. An [`EntryForm`] is the
//! candidate a form submits before validation; in bulk-grid mode it names
//! several employees and expands into one entry each.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval state of a timesheet entry.
///
/// `Draft -> Submitted -> {Approved, Rejected}`; approved and rejected are
/// terminal. The engine never performs transitions, it only reads the state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Still being edited by its author.
    #[default]
    Draft,
    /// Waiting for review.
    Submitted,
    /// Accepted for payroll.
    Approved,
    /// Sent back by a reviewer.
    Rejected,
}

impl EntryStatus {
    /// Returns true if an entry in this state may still be edited.
    pub fn is_editable(self) -> bool {
        self == EntryStatus::Draft
    }

    /// Returns true for approved and rejected entries.
    pub fn is_terminal(self) -> bool {
        matches!(self, EntryStatus::Approved | EntryStatus::Rejected)
    }

    /// Returns true if the approval workflow may move an entry from `self` to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::EntryStatus;
    ///
    /// assert!(EntryStatus::Draft.can_transition_to(EntryStatus::Submitted));
    /// assert!(EntryStatus::Submitted.can_transition_to(EntryStatus::Rejected));
    /// assert!(!EntryStatus::Approved.can_transition_to(EntryStatus::Draft));
    /// assert!(!EntryStatus::Draft.can_transition_to(EntryStatus::Approved));
    /// ```
    pub fn can_transition_to(self, next: EntryStatus) -> bool {
        matches!(
            (self, next),
            (EntryStatus::Draft, EntryStatus::Submitted)
                | (EntryStatus::Submitted, EntryStatus::Approved)
                | (EntryStatus::Submitted, EntryStatus::Rejected)
        )
    }
}

/// One persisted record of hours worked.
///
/// Entries are owned by the persistence layer; the engine only reads them.
/// The derived ordering is used to sort entries inside summaries so that
/// results never depend on input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// The employee who worked the hours.
    pub employee_id: String,
    /// The calendar date the hours were worked.
    pub date_worked: NaiveDate,
    /// The project the hours are charged to.
    pub project_code: String,
    /// The cost code within the project.
    pub cost_code: String,
    /// Optional free-form extra field some projects require.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_value: Option<String>,
    /// Hours paid at base rate.
    pub standard_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Optional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Approval state.
    #[serde(default)]
    pub status: EntryStatus,
}

impl TimesheetEntry {
    /// Returns `standard_hours + overtime_hours`, saturating at the
    /// `Decimal` bounds.
    pub fn total_hours(&self) -> Decimal {
        self.standard_hours.saturating_add(self.overtime_hours)
    }
}

/// A candidate entry as submitted by a form, before validation.
///
/// Every field may be missing so that the validator can report all of them
/// at once. Single-entry forms put exactly one id in `employee_ids`; bulk-grid
/// forms may select several.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryForm {
    /// Employees the entry is for.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    /// The date worked, if one was picked.
    #[serde(default)]
    pub date_worked: Option<NaiveDate>,
    /// The project code, blank if none was chosen.
    #[serde(default)]
    pub project_code: String,
    /// Optional extra project field.
    #[serde(default)]
    pub extra_value: Option<String>,
    /// The cost code, blank if none was chosen.
    #[serde(default)]
    pub cost_code: String,
    /// Hours paid at base rate.
    #[serde(default)]
    pub standard_hours: Decimal,
    /// Hours paid at the overtime rate.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl EntryForm {
    /// Rebuilds the form an existing entry would be edited through.
    pub fn from_entry(entry: &TimesheetEntry) -> Self {
        Self {
            employee_ids: vec![entry.employee_id.clone()],
            date_worked: Some(entry.date_worked),
            project_code: entry.project_code.clone(),
            extra_value: entry.extra_value.clone(),
            cost_code: entry.cost_code.clone(),
            standard_hours: entry.standard_hours,
            overtime_hours: entry.overtime_hours,
            notes: entry.notes.clone(),
        }
    }

    /// Returns `standard_hours + overtime_hours`, saturating at the
    /// `Decimal` bounds.
    pub fn total_hours(&self) -> Decimal {
        self.standard_hours.saturating_add(self.overtime_hours)
    }

    /// Expands the form into one `Draft` entry per selected employee.
    ///
    /// Employee ids are trimmed and blank ones skipped. Returns `None` when no
    /// date was picked. The form is not validated here; use
    /// [`build_entries`](crate::calculation::build_entries) for that.
    pub fn into_entries(self) -> Option<Vec<TimesheetEntry>> {
        let date_worked = self.date_worked?;
        let entries = self
            .employee_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(|employee_id| TimesheetEntry {
                employee_id: employee_id.to_string(),
                date_worked,
                project_code: self.project_code.trim().to_string(),
                cost_code: self.cost_code.trim().to_string(),
                extra_value: self.extra_value.clone(),
                standard_hours: self.standard_hours,
                overtime_hours: self.overtime_hours,
                notes: self.notes.clone(),
                status: EntryStatus::Draft,
            })
            .collect();
        Some(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_entry() -> TimesheetEntry {
        TimesheetEntry {
            employee_id: "emp_001".to_string(),
            date_worked: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            project_code: "P-1001".to_string(),
            cost_code: "CC-200".to_string(),
            extra_value: None,
            standard_hours: dec("8.00"),
            overtime_hours: dec("1.50"),
            notes: Some("Formwork".to_string()),
            status: EntryStatus::Submitted,
        }
    }

    #[test]
    fn test_status_transitions() {
        assert!(EntryStatus::Draft.can_transition_to(EntryStatus::Submitted));
        assert!(EntryStatus::Submitted.can_transition_to(EntryStatus::Approved));
        assert!(EntryStatus::Submitted.can_transition_to(EntryStatus::Rejected));

        assert!(!EntryStatus::Draft.can_transition_to(EntryStatus::Draft));
        assert!(!EntryStatus::Submitted.can_transition_to(EntryStatus::Draft));
        assert!(!EntryStatus::Rejected.can_transition_to(EntryStatus::Submitted));
        assert!(!EntryStatus::Approved.can_transition_to(EntryStatus::Rejected));
    }

    #[test]
    fn test_terminal_and_editable_states() {
        assert!(EntryStatus::Draft.is_editable());
        assert!(!EntryStatus::Submitted.is_editable());
        assert!(EntryStatus::Approved.is_terminal());
        assert!(EntryStatus::Rejected.is_terminal());
        assert!(!EntryStatus::Submitted.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EntryStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        let status: EntryStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, EntryStatus::Rejected);
    }

    #[test]
    fn test_entry_deserialization_defaults_to_draft() {
        let json = r#"{
            "employee_id": "emp_002",
            "date_worked": "2026-01-16",
            "project_code": "P-1002",
            "cost_code": "CC-100",
            "standard_hours": "7.75",
            "overtime_hours": "0"
        }"#;

        let entry: TimesheetEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.total_hours(), dec("7.75"));
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_form_from_entry_carries_fields() {
        let entry = sample_entry();
        let form = EntryForm::from_entry(&entry);

        assert_eq!(form.employee_ids, vec!["emp_001".to_string()]);
        assert_eq!(form.date_worked, Some(entry.date_worked));
        assert_eq!(form.total_hours(), dec("9.50"));
        assert_eq!(form.notes.as_deref(), Some("Formwork"));
    }

    #[test]
    fn test_into_entries_one_draft_per_employee() {
        let form = EntryForm {
            employee_ids: vec!["emp_001".to_string(), "emp_002".to_string()],
            date_worked: NaiveDate::from_ymd_opt(2026, 1, 15),
            project_code: " P-1001 ".to_string(),
            cost_code: "CC-200".to_string(),
            standard_hours: dec("8"),
            ..Default::default()
        };

        let entries = form.into_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].employee_id, "emp_002");
        assert_eq!(entries[0].project_code, "P-1001");
        assert!(entries.iter().all(|e| e.status == EntryStatus::Draft));
    }

    #[test]
    fn test_into_entries_trims_and_skips_blank_ids() {
        let form = EntryForm {
            employee_ids: vec![
                " emp_001 ".to_string(),
                "   ".to_string(),
                String::new(),
                "emp_003".to_string(),
            ],
            date_worked: NaiveDate::from_ymd_opt(2026, 1, 15),
            project_code: "P-1001".to_string(),
            cost_code: "CC-200".to_string(),
            standard_hours: dec("8"),
            ..Default::default()
        };

        let ids: Vec<String> = form
            .into_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(ids, vec!["emp_001".to_string(), "emp_003".to_string()]);
    }

    #[test]
    fn test_total_hours_saturates() {
        let form = EntryForm {
            standard_hours: Decimal::MAX,
            overtime_hours: Decimal::MAX,
            ..Default::default()
        };
        assert_eq!(form.total_hours(), Decimal::MAX);

        let entry = TimesheetEntry {
            standard_hours: Decimal::MAX,
            overtime_hours: dec("1"),
            ..sample_entry()
        };
        assert_eq!(entry.total_hours(), Decimal::MAX);
    }

    #[test]
    fn test_into_entries_without_date() {
        let form = EntryForm {
            employee_ids: vec!["emp_001".to_string()],
            ..Default::default()
        };
        assert!(form.into_entries().is_none());
    }

    #[test]
    fn test_empty_form_deserializes() {
        let form: EntryForm = serde_json::from_str("{}").unwrap();
        assert!(form.employee_ids.is_empty());
        assert!(form.date_worked.is_none());
        assert_eq!(form.total_hours(), Decimal::ZERO);
    }
}
