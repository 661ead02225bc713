use chrono::Duration;
use dectime_core::{DecimalDuration, Timestamp};
use dectime_ports::Clock;
use parking_lot::RwLock;

/// Clock that only moves when told to
///
/// Used for deterministic tests and for replaying a fixed moment.
#[derive(Debug)]
pub struct ManualClock {
    current_time: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(initial_time: Timestamp) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// Move the clock forward (or backward for a negative duration)
    pub fn advance(&self, duration: Duration) {
        *self.current_time.write() += duration;
    }

    /// Move the clock by a decimal duration, rounded to the nanosecond
    ///
    /// A span chrono cannot represent leaves the clock where it is.
    pub fn advance_decimal(&self, duration: DecimalDuration) {
        match duration.to_chrono() {
            Some(delta) => self.advance(delta),
            None => log::warn!("ManualClock cannot advance by {}", duration),
        }
    }

    /// Jump to an explicit time
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
