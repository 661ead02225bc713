//! Standard time to decimal time conversion
//!
//! The canonical input is decimal seconds since midnight. The value is
//! decomposed recursively: each unit's "with remainder" value is the remainder
//! of the unit above it, scaled by that unit's subdivision. When the unit above
//! has a whole value of zero there is nothing to reduce, so the full value
//! passes through (scaled) instead of being taken modulo zero.

use crate::breakdown::{Breakdown, FractionalBreakdown};
use crate::error::{ConversionResult, DurationUnit, check_range};
use crate::values::{
    CONVERSION_RATIO, DECIMAL_SECONDS_PER_HOUR, DecimalDuration, MILLIS_PER_SECOND,
    MINUTES_PER_HOUR, NANOS_PER_MILLI, SECONDS_PER_MINUTE, StandardSeconds,
};

/// Convert decimal seconds since midnight, `[0, 100000)`
pub fn from_decimal_seconds(duration: DecimalDuration) -> ConversionResult<Breakdown> {
    let seconds = check_range(duration.seconds(), DurationUnit::DecimalSeconds)?;

    let hours = seconds / DECIMAL_SECONDS_PER_HOUR;
    let minutes = carry(hours, MINUTES_PER_HOUR);
    let seconds = carry(minutes, SECONDS_PER_MINUTE);
    let milliseconds = carry(seconds, MILLIS_PER_SECOND);
    let nanoseconds = carry(milliseconds, NANOS_PER_MILLI);

    let fractional = FractionalBreakdown {
        hours,
        minutes,
        seconds,
        milliseconds,
        nanoseconds,
    };

    Ok(Breakdown {
        whole: fractional.truncate(),
        fractional,
    })
}

/// Convert standard seconds since midnight, `[0, 86400)`
pub fn from_standard_seconds(seconds: StandardSeconds) -> ConversionResult<Breakdown> {
    let seconds = check_range(seconds, DurationUnit::StandardSeconds)?;
    from_decimal_seconds(DecimalDuration::from_seconds(seconds / CONVERSION_RATIO))
}

/// Convert decimal hours since midnight, `[0, 10)`
pub fn from_decimal_hours(hours: f64) -> ConversionResult<Breakdown> {
    from_decimal_seconds(DecimalDuration::from_hours(hours))
}

/// Scale the remainder of `upper` into the next unit down
fn carry(upper: f64, subdivision: f64) -> f64 {
    let whole = upper.floor();
    let remainder = if whole == 0.0 { upper } else { upper % whole };
    remainder * subdivision
}
