use chrono::{Datelike, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use dectime_core::Timestamp;
use dectime_ports::{Calendar, CalendarError, CalendarResult, DateComponents};
use std::fmt;

/// Calendar over a chrono time zone
///
/// Days start at local midnight in `zone`. When a DST transition makes local
/// midnight ambiguous the earlier instant wins; when it skips midnight the
/// day cannot be resolved.
#[derive(Clone)]
pub struct ZonedCalendar<Tz: TimeZone> {
    zone: Tz,
    name: String,
}

/// Calendar whose days start at midnight UTC
pub type UtcCalendar = ZonedCalendar<Utc>;

/// Calendar following the host's local time zone
pub type LocalCalendar = ZonedCalendar<Local>;

/// Calendar with a fixed offset from UTC
pub type FixedOffsetCalendar = ZonedCalendar<FixedOffset>;

impl<Tz: TimeZone> ZonedCalendar<Tz> {
    pub fn new(zone: Tz, name: impl Into<String>) -> Self {
        Self {
            zone,
            name: name.into(),
        }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }
}

impl ZonedCalendar<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc, "UTC")
    }
}

impl Default for ZonedCalendar<Utc> {
    fn default() -> Self {
        Self::utc()
    }
}

impl ZonedCalendar<Local> {
    pub fn local() -> Self {
        Self::new(Local, "Local")
    }
}

impl ZonedCalendar<FixedOffset> {
    pub fn fixed(offset: FixedOffset) -> Self {
        Self::new(offset, offset.to_string())
    }
}

impl<Tz: TimeZone> fmt::Debug for ZonedCalendar<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonedCalendar")
            .field("name", &self.name)
            .finish()
    }
}

impl<Tz> Calendar for ZonedCalendar<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    fn midnight_of(&self, timestamp: Timestamp) -> CalendarResult<Timestamp> {
        let local_midnight = timestamp
            .with_timezone(&self.zone)
            .date_naive()
            .and_time(NaiveTime::MIN);

        let midnight = self
            .zone
            .from_local_datetime(&local_midnight)
            .earliest()
            .ok_or_else(|| CalendarError::MidnightUnresolved(timestamp, self.name.clone()))?
            .with_timezone(&Utc);

        log::trace!("{}: midnight of {} is {}", self.name, timestamp, midnight);
        Ok(midnight)
    }

    fn date_components(&self, timestamp: Timestamp) -> CalendarResult<DateComponents> {
        let local = timestamp.with_timezone(&self.zone);
        Ok(DateComponents {
            year: local.year(),
            month: local.month(),
            week_of_year: local.iso_week().week(),
            day: local.day(),
            weekday: local.weekday(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
