use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{
    HOURS_PER_DAY, MILLIS_PER_SECOND, MINUTES_PER_HOUR, NANOS_PER_MILLI, SECONDS_PER_MINUTE,
};

/// Decimal time components truncated to whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WholeBreakdown {
    /// Decimal hours since midnight, `0..=9`
    pub hours: u32,
    /// Decimal minutes within the hour, `0..=99`
    pub minutes: u32,
    /// Decimal seconds within the minute, `0..=99`
    pub seconds: u32,
    /// Milliseconds within the decimal second, `0..=999`
    pub milliseconds: u32,
    /// Nanoseconds within the millisecond, `0..=999_999`
    pub nanoseconds: u32,
}

impl WholeBreakdown {
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32, nanoseconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
            nanoseconds,
        }
    }

    /// Compose the components bottom-up into decimal hours since midnight
    pub fn to_decimal_hours(&self) -> f64 {
        let millis = self.milliseconds as f64 + self.nanoseconds as f64 / NANOS_PER_MILLI;
        let seconds = self.seconds as f64 + millis / MILLIS_PER_SECOND;
        let minutes = self.minutes as f64 + seconds / SECONDS_PER_MINUTE;
        self.hours as f64 + minutes / MINUTES_PER_HOUR
    }
}

/// Renders as `HH:MM:SS.mmm.nnnnnn`
impl fmt::Display for WholeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}.{:06}",
            self.hours, self.minutes, self.seconds, self.milliseconds, self.nanoseconds
        )
    }
}

/// Decimal time components before truncation
///
/// Each field is the value of that unit including everything below it, e.g.
/// `minutes = 45.0701` means 45 whole decimal minutes into the current hour
/// plus 0.0701 of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FractionalBreakdown {
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub milliseconds: f64,
    pub nanoseconds: f64,
}

impl FractionalBreakdown {
    /// Truncate every component to its whole units
    pub fn truncate(&self) -> WholeBreakdown {
        WholeBreakdown {
            hours: self.hours.floor() as u32,
            minutes: self.minutes.floor() as u32,
            seconds: self.seconds.floor() as u32,
            milliseconds: self.milliseconds.floor() as u32,
            nanoseconds: self.nanoseconds.floor() as u32,
        }
    }

    /// Clock-hand angles for each component
    pub fn rotation(&self) -> Rotation {
        Rotation {
            hours: angle(self.hours, HOURS_PER_DAY),
            minutes: angle(self.minutes, MINUTES_PER_HOUR),
            seconds: angle(self.seconds, SECONDS_PER_MINUTE),
            milliseconds: angle(self.milliseconds, MILLIS_PER_SECOND),
            nanoseconds: angle(self.nanoseconds, NANOS_PER_MILLI),
        }
    }
}

/// Output of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub whole: WholeBreakdown,
    pub fractional: FractionalBreakdown,
}

/// Clock-hand rotations in degrees, each within `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub milliseconds: f64,
    pub nanoseconds: f64,
}

impl Rotation {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
            self.nanoseconds,
        ]
    }
}

fn angle(value: f64, modulus: f64) -> f64 {
    // rem_euclid folds a rounded-up 360.0 back to 0.0
    (value / modulus * 360.0).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_breakdown_format() {
        let whole = WholeBreakdown::new(3, 45, 7, 12, 500_000);
        assert_eq!(whole.to_string(), "03:45:07.012.500000");
    }

    #[test]
    fn test_zero_format() {
        assert_eq!(WholeBreakdown::default().to_string(), "00:00:00.000.000000");
    }

    #[test]
    fn test_to_decimal_hours() {
        let whole = WholeBreakdown::new(3, 45, 7, 12, 500_000);
        assert!((whole.to_decimal_hours() - 3.450_701_25).abs() < 1e-12);
        assert_eq!(WholeBreakdown::new(9, 0, 0, 0, 0).to_decimal_hours(), 9.0);
    }

    #[test]
    fn test_truncate() {
        let fractional = FractionalBreakdown {
            hours: 3.45,
            minutes: 45.5,
            seconds: 50.0,
            milliseconds: 0.999,
            nanoseconds: 999_999.9,
        };
        assert_eq!(
            fractional.truncate(),
            WholeBreakdown::new(3, 45, 50, 0, 999_999)
        );
    }

    #[test]
    fn test_rotation_quarter_turns() {
        let fractional = FractionalBreakdown {
            hours: 2.5,
            minutes: 50.0,
            seconds: 75.0,
            milliseconds: 0.0,
            nanoseconds: 250_000.0,
        };
        let rotation = fractional.rotation();
        assert_eq!(rotation.hours, 90.0);
        assert_eq!(rotation.minutes, 180.0);
        assert_eq!(rotation.seconds, 270.0);
        assert_eq!(rotation.milliseconds, 0.0);
        assert_eq!(rotation.nanoseconds, 90.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(WholeBreakdown::new(3, 45, 7, 12, 500_000)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hours": 3,
                "minutes": 45,
                "seconds": 7,
                "milliseconds": 12,
                "nanoseconds": 500_000
            })
        );
    }

    #[test]
    fn test_rotation_wraps_full_turn() {
        let fractional = FractionalBreakdown {
            hours: 10.0,
            ..Default::default()
        };
        assert_eq!(fractional.rotation().hours, 0.0);
    }
}
