//! Decimal Instant
//!
//! An immutable snapshot of a moment expressed in decimal time, built from
//! any of five input shapes:
//!
//! - a wall-clock timestamp
//! - decimal seconds since midnight
//! - standard seconds since midnight
//! - decimal hours since midnight
//! - whole decimal components (hours, minutes, seconds, milliseconds, nanoseconds)
//!
//! All of them funnel through one validated conversion. Instants compare by
//! timestamp, support `+`/`-` with a [`DecimalDuration`], render as
//! `HH:MM:SS.mmm.nnnnnn` and expose clock-hand rotations.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use dectime_clock::UtcCalendar;
//! use dectime_core::DecimalDuration;
//! use dectime_instant::DecimalInstant;
//!
//! let noon = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
//! let instant = DecimalInstant::from_timestamp(noon, Arc::new(UtcCalendar::utc())).unwrap();
//! assert_eq!(instant.hours(), 5);
//!
//! let later = instant + DecimalDuration::HOUR;
//! assert_eq!(later.hours(), 6);
//! ```

mod error;
mod instant;

pub use error::{InstantError, InstantResult};
pub use instant::{DecimalInstant, EQUALITY_TOLERANCE};

// Re-export core types callers need alongside an instant
pub use dectime_core::{DecimalDuration, Rotation, WholeBreakdown};
