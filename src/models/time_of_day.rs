//! Twelve-hour clock values as entered on timesheet forms.
//!
//! A [`TimeOfDay`] is the raw `(hour, minute, AM/PM)` triple a form submits.
//! Converting it to minutes-since-midnight is the job of
//! [`normalize`](crate::calculation::normalize); this module only owns the
//! value itself, its parsing and its display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Half of a twelve-hour clock day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    /// Midnight up to (but excluding) noon.
    Am,
    /// Noon up to (but excluding) midnight.
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// A wall-clock time on a twelve-hour clock.
///
/// The fields are public so that form payloads can be deserialized directly;
/// values built that way are range-checked when they are normalized. Use
/// [`TimeOfDay::new`] to check the range up front.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{Period, TimeOfDay};
///
/// let time: TimeOfDay = "7:30 pm".parse().unwrap();
/// assert_eq!(time, TimeOfDay::new(7, 30, Period::Pm).unwrap());
/// assert_eq!(time.to_string(), "7:30 PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour on the twelve-hour clock, 1-12.
    pub hour: u32,
    /// Minute within the hour, 0-59.
    pub minute: u32,
    /// AM or PM.
    pub period: Period,
}

impl TimeOfDay {
    /// Creates a time, rejecting an hour outside 1-12 or a minute outside 0-59.
    pub fn new(hour: u32, minute: u32, period: Period) -> EngineResult<Self> {
        let time = Self {
            hour,
            minute,
            period,
        };
        if !time.is_in_range() {
            return Err(EngineError::InvalidTimeValue { hour, minute });
        }
        Ok(time)
    }

    /// Rebuilds the clock time for a minutes-since-midnight value (0-1439).
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::models::{Period, TimeOfDay};
    ///
    /// assert_eq!(TimeOfDay::from_minutes(0).unwrap(), TimeOfDay::new(12, 0, Period::Am).unwrap());
    /// assert_eq!(TimeOfDay::from_minutes(810).unwrap(), TimeOfDay::new(1, 30, Period::Pm).unwrap());
    /// assert!(TimeOfDay::from_minutes(1440).is_err());
    /// ```
    pub fn from_minutes(minutes: u32) -> EngineResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidTimeValue {
                hour: minutes / 60,
                minute: minutes % 60,
            });
        }

        let hour_24 = minutes / 60;
        let period = if hour_24 < 12 { Period::Am } else { Period::Pm };
        let hour = match hour_24 % 12 {
            0 => 12,
            h => h,
        };

        Self::new(hour, minutes % 60, period)
    }

    /// Returns true when the hour is 1-12 and the minute 0-59.
    pub fn is_in_range(&self) -> bool {
        (1..=12).contains(&self.hour) && self.minute <= 59
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.period)
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parses `h:mm AM` style input. The period is case-insensitive and the
    /// space before it is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || EngineError::UnparseableTime {
            input: s.to_string(),
        };

        let upper = s.trim().to_ascii_uppercase();
        let (clock, period) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest, Period::Am)
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest, Period::Pm)
        } else {
            return Err(unparseable());
        };

        let (hour, minute) = clock.trim().split_once(':').ok_or_else(unparseable)?;
        if minute.len() != 2 {
            return Err(unparseable());
        }
        let hour: u32 = hour.parse().map_err(|_| unparseable())?;
        let minute: u32 = minute.parse().map_err(|_| unparseable())?;

        Self::new(hour, minute, period)
    }
}
