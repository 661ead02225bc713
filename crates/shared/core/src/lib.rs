//! Decimal Time Core Domain
//!
//! Pure types and conversion for decimal time: a day of 10 decimal hours,
//! each of 100 decimal minutes, each of 100 decimal seconds, with
//! millisecond and nanosecond sub-fractions.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! ## Usage
//!
//! ```
//! use dectime_core::{DecimalDuration, converter};
//!
//! let noon = converter::from_standard_seconds(43_200.0).unwrap();
//! assert_eq!(noon.whole.hours, 5);
//!
//! let quarter_past = converter::from_decimal_seconds(DecimalDuration::from_seconds(2_500.0)).unwrap();
//! assert_eq!(quarter_past.whole.to_string(), "00:25:00.000.000000");
//! ```

pub mod breakdown;
pub mod converter;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use breakdown::{Breakdown, FractionalBreakdown, Rotation, WholeBreakdown};
pub use error::{Bound, ConversionError, ConversionResult, DurationUnit, check_range};
pub use values::{
    CONVERSION_RATIO, DECIMAL_SECOND, DECIMAL_SECONDS_PER_DAY, DECIMAL_SECONDS_PER_HOUR,
    DecimalDuration, STANDARD_SECONDS_PER_DAY, StandardSeconds, Timestamp,
};
