use chrono::Utc;
use dectime_core::Timestamp;
use dectime_ports::Clock;

/// Wall clock backed by the operating system
///
/// The clock used by a running decimal clock display.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
