//! Decimal Time Ports
//!
//! Port definitions (traits) for the decimal time system.
//! These define the boundaries between the conversion core and the host
//! platform's wall clock and calendar.

mod calendar;
mod clock;
mod error;

pub use calendar::{Calendar, DateComponents};
pub use clock::Clock;
pub use error::{CalendarError, CalendarResult};
