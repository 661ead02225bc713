//! Error types for the instant crate

use dectime_core::{ConversionError, DecimalDuration, Timestamp};
use dectime_ports::CalendarError;
use thiserror::Error;

/// Failure to construct a decimal instant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstantError {
    #[error("Conversion failed: {0}")]
    OutOfRange(#[from] ConversionError),

    #[error("Calendar failed: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Cannot offset {0} by {1}: outside the representable time range")]
    OffsetOutOfRange(Timestamp, DecimalDuration),
}

pub type InstantResult<T> = std::result::Result<T, InstantError>;
