//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the pure functions that turn clock times into paid
//! hours: time normalization, break aggregation, shift duration, rounding and
//! the standard/overtime split, the midnight split for overnight shifts, the
//! full shift pipeline, entry validation, and day/week aggregation.

pub mod aggregation;
mod break_aggregator;
mod entry_validator;
mod hour_allocation;
mod midnight_split;
mod normalizer;
mod shift_calculator;
mod shift_duration;

pub use aggregation::{count_by_status, daily_totals, summarize, summarize_by_employee, week_start_for};
pub use break_aggregator::{BreakAggregation, aggregate_breaks};
pub use entry_validator::{
    DEFAULT_BULK_ENTRY_CAP, DEFAULT_SINGLE_ENTRY_CAP, EntryMode, ValidationContext, build_entries,
    validate, validate_for_edit, validate_shift,
};
pub use hour_allocation::{
    DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_ROUNDING_INCREMENT, allocate, round_to_increment,
    split_at_threshold,
};
pub use midnight_split::{MidnightSplit, split_across_midnight};
pub use normalizer::normalize;
pub use shift_calculator::calculate_shift;
pub use shift_duration::{ShiftDuration, compute_duration};
