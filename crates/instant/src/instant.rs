use dectime_core::{
    Breakdown, DecimalDuration, DurationUnit, FractionalBreakdown, Rotation, StandardSeconds,
    Timestamp, WholeBreakdown, check_range, converter,
};
use dectime_ports::{Calendar, Clock, DateComponents};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::sync::Arc;

use crate::error::{InstantError, InstantResult};

/// Two instants closer than this many decimal seconds compare equal
pub const EQUALITY_TOLERANCE: f64 = 1e-6;

/// `timestamp` moved by `duration`, if both the offset and the result fit chrono
fn offset_timestamp(timestamp: Timestamp, duration: DecimalDuration) -> InstantResult<Timestamp> {
    duration
        .to_chrono()
        .and_then(|delta| timestamp.checked_add_signed(delta))
        .ok_or(InstantError::OffsetOutOfRange(timestamp, duration))
}

/// A moment expressed in decimal time
///
/// Holds the originating timestamp, the calendar that defines its day, and
/// the decimal breakdown of its time of day. Never mutated: arithmetic and
/// refreshes produce new instants.
#[derive(Debug, Clone)]
pub struct DecimalInstant {
    timestamp: Timestamp,
    calendar: Arc<dyn Calendar>,
    since_midnight: DecimalDuration,
    breakdown: Breakdown,
}

impl DecimalInstant {
    /// Convert a wall-clock timestamp
    pub fn from_timestamp(timestamp: Timestamp, calendar: Arc<dyn Calendar>) -> InstantResult<Self> {
        let seconds = calendar.seconds_since_midnight(timestamp)?;
        let breakdown = converter::from_standard_seconds(seconds)?;

        Ok(Self {
            timestamp,
            calendar,
            since_midnight: DecimalDuration::from_standard_seconds(seconds),
            breakdown,
        })
    }

    /// The current moment according to `clock`
    pub fn now(clock: &dyn Clock, calendar: Arc<dyn Calendar>) -> InstantResult<Self> {
        Self::from_timestamp(clock.now(), calendar)
    }

    /// Decimal seconds after midnight of the day containing `anchor`
    pub fn from_decimal_seconds(
        since_midnight: DecimalDuration,
        anchor: Timestamp,
        calendar: Arc<dyn Calendar>,
    ) -> InstantResult<Self> {
        let breakdown = converter::from_decimal_seconds(since_midnight)?;
        let midnight = calendar.midnight_of(anchor)?;

        Ok(Self {
            timestamp: offset_timestamp(midnight, since_midnight)?,
            calendar,
            since_midnight,
            breakdown,
        })
    }

    /// Standard seconds after midnight of the day containing `anchor`
    pub fn from_standard_seconds(
        seconds: StandardSeconds,
        anchor: Timestamp,
        calendar: Arc<dyn Calendar>,
    ) -> InstantResult<Self> {
        let seconds = check_range(seconds, DurationUnit::StandardSeconds)?;
        Self::from_decimal_seconds(
            DecimalDuration::from_standard_seconds(seconds),
            anchor,
            calendar,
        )
    }

    /// Decimal hours after midnight of the day containing `anchor`
    pub fn from_decimal_hours(
        hours: f64,
        anchor: Timestamp,
        calendar: Arc<dyn Calendar>,
    ) -> InstantResult<Self> {
        Self::from_decimal_seconds(DecimalDuration::from_hours(hours), anchor, calendar)
    }

    /// Whole decimal components on the day containing `anchor`
    ///
    /// Components are not range-checked individually; only the composed time
    /// of day has to fall within the day.
    pub fn from_components(
        components: WholeBreakdown,
        anchor: Timestamp,
        calendar: Arc<dyn Calendar>,
    ) -> InstantResult<Self> {
        Self::from_decimal_hours(components.to_decimal_hours(), anchor, calendar)
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// Decimal seconds since midnight; identifies the time of day
    pub fn duration_since_midnight(&self) -> DecimalDuration {
        self.since_midnight
    }

    pub fn whole(&self) -> WholeBreakdown {
        self.breakdown.whole
    }

    pub fn fractional(&self) -> FractionalBreakdown {
        self.breakdown.fractional
    }

    pub fn hours(&self) -> u32 {
        self.breakdown.whole.hours
    }

    pub fn minutes(&self) -> u32 {
        self.breakdown.whole.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.breakdown.whole.seconds
    }

    pub fn milliseconds(&self) -> u32 {
        self.breakdown.whole.milliseconds
    }

    pub fn nanoseconds(&self) -> u32 {
        self.breakdown.whole.nanoseconds
    }

    /// Clock-hand angles in degrees
    pub fn rotation(&self) -> Rotation {
        self.breakdown.fractional.rotation()
    }

    /// Year, month, week and day of the instant's calendar day
    pub fn date_components(&self) -> InstantResult<DateComponents> {
        Ok(self.calendar.date_components(self.timestamp)?)
    }

    /// Add a decimal duration, re-deriving the breakdown
    ///
    /// The result may land on another calendar day. Fails with
    /// [`InstantError::OffsetOutOfRange`] when the offset or the resulting
    /// timestamp cannot be represented.
    pub fn checked_add(&self, duration: DecimalDuration) -> InstantResult<Self> {
        let timestamp = offset_timestamp(self.timestamp, duration)?;
        Self::from_timestamp(timestamp, self.calendar.clone())
    }

    /// Subtract a decimal duration, re-deriving the breakdown
    pub fn checked_sub(&self, duration: DecimalDuration) -> InstantResult<Self> {
        self.checked_add(-duration)
    }

    fn offset_or_self(&self, duration: DecimalDuration) -> Self {
        match self.checked_add(duration) {
            Ok(instant) => instant,
            Err(e) => {
                log::warn!("Keeping {} after failed offset by {}: {}", self, duration, e);
                self.clone()
            }
        }
    }
}

impl PartialEq for DecimalInstant {
    fn eq(&self, other: &Self) -> bool {
        match (self.timestamp - other.timestamp).num_nanoseconds() {
            Some(nanos) => {
                let apart = DecimalDuration::from_standard_seconds(nanos as f64 / 1e9);
                apart.seconds().abs() <= EQUALITY_TOLERANCE
            }
            None => false,
        }
    }
}

impl PartialOrd for DecimalInstant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else {
            self.timestamp.partial_cmp(&other.timestamp)
        }
    }
}

/// `{}` renders `HH:MM:SS.mmm.nnnnnn`, `{:#}` prefixes it with `Decimal Time: `
impl fmt::Display for DecimalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "Decimal Time: {}", self.breakdown.whole)
        } else {
            write!(f, "{}", self.breakdown.whole)
        }
    }
}

impl Add<DecimalDuration> for DecimalInstant {
    type Output = DecimalInstant;

    fn add(self, rhs: DecimalDuration) -> DecimalInstant {
        self.offset_or_self(rhs)
    }
}

impl Add<DecimalDuration> for &DecimalInstant {
    type Output = DecimalInstant;

    fn add(self, rhs: DecimalDuration) -> DecimalInstant {
        self.offset_or_self(rhs)
    }
}

impl Sub<DecimalDuration> for DecimalInstant {
    type Output = DecimalInstant;

    fn sub(self, rhs: DecimalDuration) -> DecimalInstant {
        self.offset_or_self(-rhs)
    }
}

impl Sub<DecimalDuration> for &DecimalInstant {
    type Output = DecimalInstant;

    fn sub(self, rhs: DecimalDuration) -> DecimalInstant {
        self.offset_or_self(-rhs)
    }
}
