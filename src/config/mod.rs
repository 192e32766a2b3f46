//! Configuration loading and management for the Timesheet Engine.
//!
//! Settings are read from a single YAML file holding the overtime threshold,
//! the rounding increment and the daily hour caps of each entry form.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/settings.yaml").unwrap();
//! println!("Rounding to {} hours", loader.settings().shift.rounding_increment_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, ShiftPolicy, ValidationLimits};
