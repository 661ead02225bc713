use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

use crate::values::{DECIMAL_SECONDS_PER_DAY, STANDARD_SECONDS_PER_DAY};

/// Which duration unit a value was validated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Standard seconds since midnight, `[0, 86400)`
    StandardSeconds,
    /// Decimal seconds since midnight, `[0, 100000)`
    DecimalSeconds,
}

impl DurationUnit {
    /// Valid half-open range of a time-of-day in this unit
    pub fn range(self) -> Range<f64> {
        match self {
            DurationUnit::StandardSeconds => 0.0..STANDARD_SECONDS_PER_DAY,
            DurationUnit::DecimalSeconds => 0.0..DECIMAL_SECONDS_PER_DAY,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::StandardSeconds => write!(f, "standard seconds since midnight"),
            DurationUnit::DecimalSeconds => write!(f, "decimal seconds since midnight"),
        }
    }
}

/// The bound a value violated, carrying the limit itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Value was below the inclusive lower limit
    Lower(f64),
    /// Value was at or above the exclusive upper limit
    Upper(f64),
}

impl Bound {
    pub fn limit(self) -> f64 {
        match self {
            Bound::Lower(limit) | Bound::Upper(limit) => limit,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Lower(limit) => write!(f, "below lower bound {limit}"),
            Bound::Upper(limit) => write!(f, "not below upper bound {limit}"),
        }
    }
}

/// Errors raised by the converter
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    #[error("{value} {unit} is out of range: {bound}")]
    OutOfRange {
        value: f64,
        bound: Bound,
        unit: DurationUnit,
    },
}

impl ConversionError {
    /// The rejected input
    pub fn value(&self) -> f64 {
        match self {
            ConversionError::OutOfRange { value, .. } => *value,
        }
    }

    pub fn bound(&self) -> Bound {
        match self {
            ConversionError::OutOfRange { bound, .. } => *bound,
        }
    }

    pub fn unit(&self) -> DurationUnit {
        match self {
            ConversionError::OutOfRange { unit, .. } => *unit,
        }
    }
}

pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Validate a time-of-day against the half-open range of its unit
///
/// NaN fails the lower-bound comparison and is reported as below it.
pub fn check_range(value: f64, unit: DurationUnit) -> ConversionResult<f64> {
    let range = unit.range();
    if !(value >= range.start) {
        return Err(ConversionError::OutOfRange {
            value,
            bound: Bound::Lower(range.start),
            unit,
        });
    }
    if !(value < range.end) {
        return Err(ConversionError::OutOfRange {
            value,
            bound: Bound::Upper(range.end),
            unit,
        });
    }
    Ok(value)
}
