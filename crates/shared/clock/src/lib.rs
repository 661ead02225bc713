//! Decimal Time Clock Infrastructure
//!
//! Adapters for the ports the decimal time core consumes:
//!
//! - [`SystemClock`]: the operating system's wall clock
//! - [`ManualClock`]: a clock that only moves when told to
//! - [`ZonedCalendar`]: day boundaries and date metadata over a chrono time zone
//!
//! ## Usage
//!
//! ```
//! use dectime_clock::{Calendar, Clock, ManualClock, UtcCalendar};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
//! let calendar = UtcCalendar::utc();
//!
//! assert_eq!(calendar.seconds_since_midnight(clock.now()).unwrap(), 43_200.0);
//! ```

mod calendar;
mod manual;
mod system;

pub use calendar::{FixedOffsetCalendar, LocalCalendar, UtcCalendar, ZonedCalendar};
pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the ports for convenience
pub use dectime_ports::{Calendar, Clock};
