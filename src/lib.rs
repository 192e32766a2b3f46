//! Timesheet Engine for construction-labor payroll
//!
//! This crate turns clock-in/clock-out submissions and direct hour entries
//! into standard and overtime hours. It handles breaks, shifts that cross
//! midnight, rounding to a configured increment, per-entry validation, and
//! day/week aggregation for review screens.
//!
//! The [`calculation`] functions are pure and synchronous; [`api`] exposes
//! them over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
