use chrono::Weekday;
use dectime_core::{StandardSeconds, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalendarError, CalendarResult};

/// Calendar metadata for a timestamp's day
///
/// Not consumed by the conversion itself, exposed alongside an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    /// ISO 8601 week number
    pub week_of_year: u32,
    /// 1-based day of month
    pub day: u32,
    pub weekday: Weekday,
}

/// Port for calendar and time zone resolution
///
/// Implementations decide where a day starts for a given timestamp.
pub trait Calendar: Send + Sync + fmt::Debug {
    /// Start of the calendar day containing `timestamp`
    fn midnight_of(&self, timestamp: Timestamp) -> CalendarResult<Timestamp>;

    /// Calendar metadata for the day containing `timestamp`
    fn date_components(&self, timestamp: Timestamp) -> CalendarResult<DateComponents>;

    /// Standard seconds elapsed since that day's midnight
    fn seconds_since_midnight(&self, timestamp: Timestamp) -> CalendarResult<StandardSeconds> {
        let midnight = self.midnight_of(timestamp)?;
        let elapsed = timestamp - midnight;
        let nanos = elapsed
            .num_nanoseconds()
            .ok_or(CalendarError::TimestampOutOfRange(timestamp))?;
        Ok(nanos as f64 / 1e9)
    }

    /// Get the calendar's name/identifier for debugging
    fn name(&self) -> &str {
        "Calendar"
    }
}
