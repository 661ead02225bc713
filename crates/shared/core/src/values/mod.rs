use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Standard (SI) seconds, as produced by a wall clock
pub type StandardSeconds = f64;

/// Standard seconds per decimal second (86 400 / 100 000)
pub const CONVERSION_RATIO: f64 = 0.864;

/// Length of a day in standard seconds
pub const STANDARD_SECONDS_PER_DAY: f64 = 86_400.0;

/// Length of a day in decimal seconds
pub const DECIMAL_SECONDS_PER_DAY: f64 = 100_000.0;

/// Decimal seconds in one decimal hour (100 × 100)
pub const DECIMAL_SECONDS_PER_HOUR: f64 = 10_000.0;

/// Wall-clock length of one decimal second
pub const DECIMAL_SECOND: std::time::Duration = std::time::Duration::from_millis(864);

/// Number of decimal hours in a day
pub const HOURS_PER_DAY: f64 = 10.0;
/// Decimal minutes per decimal hour
pub const MINUTES_PER_HOUR: f64 = 100.0;
/// Decimal seconds per decimal minute
pub const SECONDS_PER_MINUTE: f64 = 100.0;
/// Milliseconds per decimal second
pub const MILLIS_PER_SECOND: f64 = 1_000.0;
/// Nanoseconds per decimal millisecond
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// A quantity of decimal seconds
///
/// This is the native unit of the system: every conversion funnels through it.
/// As a time-of-day it lives in `[0, 100000)`; as an offset used in arithmetic
/// it may be any finite value, including negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalDuration(f64);

impl DecimalDuration {
    pub const ZERO: Self = Self(0.0);
    pub const SECOND: Self = Self(1.0);
    pub const MINUTE: Self = Self(SECONDS_PER_MINUTE);
    pub const HOUR: Self = Self(DECIMAL_SECONDS_PER_HOUR);
    pub const DAY: Self = Self(DECIMAL_SECONDS_PER_DAY);

    /// Create from an amount of decimal seconds
    pub const fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Create from an amount of decimal hours
    pub fn from_hours(hours: f64) -> Self {
        Self(hours * DECIMAL_SECONDS_PER_HOUR)
    }

    /// Create from an amount of standard seconds
    pub fn from_standard_seconds(seconds: StandardSeconds) -> Self {
        Self(seconds / CONVERSION_RATIO)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn minutes(self) -> f64 {
        self.0 / SECONDS_PER_MINUTE
    }

    pub fn hours(self) -> f64 {
        self.minutes() / MINUTES_PER_HOUR
    }

    pub fn milliseconds(self) -> f64 {
        self.0 * MILLIS_PER_SECOND
    }

    /// Decimal nanoseconds (millionths of a decimal millisecond)
    pub fn nanoseconds(self) -> f64 {
        self.milliseconds() * NANOS_PER_MILLI
    }

    /// The same span expressed in standard seconds
    pub fn to_standard_seconds(self) -> StandardSeconds {
        self.0 * CONVERSION_RATIO
    }

    /// The same span as a chrono duration, rounded to the nanosecond
    ///
    /// `None` when the span is not finite or needs more than an `i64` of
    /// nanoseconds (about 292 standard years either way).
    pub fn to_chrono(self) -> Option<TimeDelta> {
        let nanos = (self.to_standard_seconds() * 1e9).round();
        if (i64::MIN as f64..i64::MAX as f64).contains(&nanos) {
            Some(TimeDelta::nanoseconds(nanos as i64))
        } else {
            None
        }
    }

    /// Absolute difference to another duration, in decimal seconds
    pub fn abs_diff(self, other: Self) -> f64 {
        (self.0 - other.0).abs()
    }
}

impl From<f64> for DecimalDuration {
    fn from(seconds: f64) -> Self {
        Self(seconds)
    }
}

impl Add for DecimalDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for DecimalDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for DecimalDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for DecimalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} decimal seconds", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_views() {
        let d = DecimalDuration::from_seconds(34_507.0);
        assert_eq!(d.minutes(), 345.07);
        assert!((d.hours() - 3.4507).abs() < 1e-12);
        assert_eq!(d.milliseconds(), 34_507_000.0);
    }

    #[test]
    fn test_standard_seconds_round_trip() {
        let d = DecimalDuration::from_standard_seconds(43_200.0);
        assert!((d.seconds() - 50_000.0).abs() < 1e-9);
        assert!((d.to_standard_seconds() - 43_200.0).abs() < 1e-9);
    }

    #[test]
    fn test_decimal_second_matches_ratio() {
        assert_eq!(DECIMAL_SECOND.as_secs_f64(), CONVERSION_RATIO);
        assert_eq!(
            DECIMAL_SECONDS_PER_DAY * CONVERSION_RATIO,
            STANDARD_SECONDS_PER_DAY
        );
    }

    #[test]
    fn test_arithmetic() {
        let d = DecimalDuration::HOUR + DecimalDuration::MINUTE - DecimalDuration::SECOND;
        assert_eq!(d.seconds(), 10_099.0);
        assert_eq!((-d).seconds(), -10_099.0);
        assert_eq!(DecimalDuration::from_hours(2.5).seconds(), 25_000.0);
    }

    #[test]
    fn test_to_chrono() {
        assert_eq!(DecimalDuration::HOUR.to_chrono(), Some(TimeDelta::seconds(8_640)));
        assert_eq!(DecimalDuration::SECOND.to_chrono(), Some(TimeDelta::milliseconds(864)));
        assert_eq!((-DecimalDuration::SECOND).to_chrono(), Some(TimeDelta::milliseconds(-864)));
    }

    #[test]
    fn test_to_chrono_rejects_unrepresentable_spans() {
        // 1e12 decimal seconds is roughly 27 000 years
        assert_eq!(DecimalDuration::from_seconds(1e12).to_chrono(), None);
        assert_eq!(DecimalDuration::from_seconds(-1e12).to_chrono(), None);
        assert_eq!(DecimalDuration::from_seconds(f64::NAN).to_chrono(), None);
        assert_eq!(DecimalDuration::from_seconds(f64::INFINITY).to_chrono(), None);
        assert!(DecimalDuration::from_seconds(1e10).to_chrono().is_some());
    }
}
