use dectime_core::Timestamp;
use thiserror::Error;

/// Errors raised by calendar collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Cannot resolve midnight for {0} in calendar {1}")]
    MidnightUnresolved(Timestamp, String),

    #[error("Timestamp {0} is out of the calendar's supported range")]
    TimestampOutOfRange(Timestamp),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
