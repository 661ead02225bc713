use dectime_core::Timestamp;
use dectime_instant::DecimalInstant;
use dectime_ports::{Calendar, Clock};
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::SamplerConfig;
use crate::error::{SamplerError, SamplerResult};

/// Whether the sampler is refreshing on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    #[default]
    Stopped,
    Running,
}

/// Mutable part of the sampler, always changed under one lock
struct Slot {
    current: DecimalInstant,
    state: SamplerState,
    interval: Duration,
    /// Bumped on every start/stop; a tick from an older generation is stale
    generation: u64,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    slot: Mutex<Slot>,
    /// Held while writing the slot and then publishing, never inside `slot`
    publishing: Mutex<()>,
    updates: watch::Sender<DecimalInstant>,
    clock: Arc<dyn Clock>,
    calendar: Arc<dyn Calendar>,
}

impl Shared {
    /// Replace the held instant if `generation` is still current
    ///
    /// Returns false once the tick loop that owns `generation` should exit.
    fn tick(&self, generation: u64) -> bool {
        let fresh = DecimalInstant::now(self.clock.as_ref(), self.calendar.clone());
        let _publishing = self.publishing.lock();

        let mut slot = self.slot.lock();
        if slot.generation != generation || slot.state == SamplerState::Stopped {
            return false;
        }

        match fresh {
            Ok(instant) => {
                trace!("Sampled {}", instant);
                slot.current = instant.clone();
                drop(slot);
                self.updates.send_replace(instant);
            }
            Err(e) => warn!("Skipping tick, cannot sample {}: {}", self.clock.name(), e),
        }
        true
    }

    fn replace(&self, instant: DecimalInstant) {
        let _publishing = self.publishing.lock();
        self.slot.lock().current = instant.clone();
        self.updates.send_replace(instant);
    }
}

/// A decimal instant that refreshes itself at a fixed interval
///
/// The sampler owns one mutable slot (the current instant) and one timer task.
/// Start and stop change the running state and the task handle together under
/// a single lock, and every tick re-checks that lock before writing, so
/// [`current`](Self::current) never changes once [`stop`](Self::stop) has
/// returned.
///
/// Subscribers are notified after the slot lock is released. Holding a
/// `watch::Ref` while calling [`current`](Self::current), [`state`](Self::state)
/// or [`stop`](Self::stop) is safe; a tick that wrote the slot just before
/// `stop` may still deliver its notification afterwards.
///
/// Dropping the sampler stops it.
pub struct PeriodicSampler {
    shared: Arc<Shared>,
}

impl PeriodicSampler {
    /// Create a sampler holding `initial`, refreshed from `clock` on `calendar`
    ///
    /// Starts right away when `config.start_immediately` is set.
    pub fn new(
        initial: DecimalInstant,
        clock: Arc<dyn Clock>,
        calendar: Arc<dyn Calendar>,
        config: SamplerConfig,
    ) -> SamplerResult<Self> {
        if config.interval.is_zero() {
            return Err(SamplerError::ZeroInterval);
        }

        let (updates, _) = watch::channel(initial.clone());
        let sampler = Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    current: initial,
                    state: SamplerState::Stopped,
                    interval: config.interval,
                    generation: 0,
                    task: None,
                }),
                publishing: Mutex::new(()),
                updates,
                clock,
                calendar,
            }),
        };

        if config.start_immediately {
            sampler.start(None)?;
        }
        Ok(sampler)
    }

    /// Create a sampler starting from the clock's current time
    pub fn from_clock(
        clock: Arc<dyn Clock>,
        calendar: Arc<dyn Calendar>,
        config: SamplerConfig,
    ) -> SamplerResult<Self> {
        let initial = DecimalInstant::now(clock.as_ref(), calendar.clone())?;
        Self::new(initial, clock, calendar, config)
    }

    /// Start (or restart) periodic refreshes
    ///
    /// `interval` replaces the configured cadence when given. Any running
    /// timer is cancelled first. Must be called within a tokio runtime.
    pub fn start(&self, interval: Option<Duration>) -> SamplerResult<()> {
        let runtime = Handle::try_current().map_err(|_| SamplerError::NoRuntime)?;

        let mut slot = self.shared.slot.lock();
        let interval = interval.unwrap_or(slot.interval);
        if interval.is_zero() {
            return Err(SamplerError::ZeroInterval);
        }

        if let Some(task) = slot.task.take() {
            debug!("Restarting sampler, cancelling previous timer");
            task.abort();
        }

        slot.generation += 1;
        slot.interval = interval;
        slot.state = SamplerState::Running;
        slot.task = Some(runtime.spawn(run_ticks(
            Arc::clone(&self.shared),
            slot.generation,
            interval,
        )));

        info!("Sampler started ({:?} interval)", interval);
        Ok(())
    }

    /// Stop periodic refreshes; a no-op when already stopped
    pub fn stop(&self) {
        let mut slot = self.shared.slot.lock();
        if slot.state == SamplerState::Stopped {
            return;
        }

        slot.generation += 1;
        slot.state = SamplerState::Stopped;
        if let Some(task) = slot.task.take() {
            task.abort();
        }
        info!("Sampler stopped");
    }

    /// Re-derive the instant from the clock now
    ///
    /// Returns whether the instant was replaced.
    pub fn refresh(&self) -> bool {
        self.refresh_at(self.shared.clock.now())
    }

    /// Re-derive the instant from an explicit timestamp
    ///
    /// Returns whether the instant was replaced; on failure the previous
    /// instant is kept.
    pub fn refresh_at(&self, timestamp: Timestamp) -> bool {
        match DecimalInstant::from_timestamp(timestamp, self.shared.calendar.clone()) {
            Ok(instant) => {
                self.shared.replace(instant);
                true
            }
            Err(e) => {
                debug!("Refresh at {} failed: {}", timestamp, e);
                false
            }
        }
    }

    /// The most recently sampled instant
    pub fn current(&self) -> DecimalInstant {
        self.shared.slot.lock().current.clone()
    }

    pub fn state(&self) -> SamplerState {
        self.shared.slot.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == SamplerState::Running
    }

    pub fn interval(&self) -> Duration {
        self.shared.slot.lock().interval
    }

    /// Watch every successful refresh
    pub fn subscribe(&self) -> watch::Receiver<DecimalInstant> {
        self.shared.updates.subscribe()
    }
}

impl Drop for PeriodicSampler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Timer loop; the first refresh happens one interval after start
async fn run_ticks(shared: Arc<Shared>, generation: u64, period: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if !shared.tick(generation) {
            trace!("Tick loop for generation {} exiting", generation);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono::FixedOffset;
    use dectime_clock::{FixedOffsetCalendar, ManualClock, UtcCalendar};
    use dectime_core::DecimalDuration;
    use dectime_ports::{CalendarError, CalendarResult, DateComponents};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// UTC calendar that can be told to fail
    #[derive(Debug, Default)]
    struct FlakyCalendar {
        inner: UtcCalendar,
        failing: AtomicBool,
    }

    impl Calendar for FlakyCalendar {
        fn midnight_of(&self, timestamp: Timestamp) -> CalendarResult<Timestamp> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(CalendarError::MidnightUnresolved(timestamp, "flaky".into()));
            }
            self.inner.midnight_of(timestamp)
        }

        fn date_components(&self, timestamp: Timestamp) -> CalendarResult<DateComponents> {
            self.inner.date_components(timestamp)
        }
    }

    fn noon() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn setup(config: SamplerConfig) -> (Arc<ManualClock>, PeriodicSampler) {
        let clock = Arc::new(ManualClock::new(noon()));
        let calendar: Arc<dyn Calendar> = Arc::new(UtcCalendar::utc());
        let sampler = PeriodicSampler::from_clock(clock.clone(), calendar, config).unwrap();
        (clock, sampler)
    }

    #[test]
    fn test_new_sampler_is_stopped() {
        let (_, sampler) = setup(SamplerConfig::default());
        assert_eq!(sampler.state(), SamplerState::Stopped);
        assert_eq!(sampler.interval(), dectime_core::DECIMAL_SECOND);
        assert_eq!(sampler.current().hours(), 5);
    }

    #[test]
    fn test_start_requires_runtime() {
        let (_, sampler) = setup(SamplerConfig::default());
        assert_eq!(sampler.start(None), Err(SamplerError::NoRuntime));
        assert!(!sampler.is_running());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(noon()));
        let calendar: Arc<dyn Calendar> = Arc::new(UtcCalendar::utc());
        let result = PeriodicSampler::from_clock(
            clock,
            calendar,
            SamplerConfig::with_interval(Duration::ZERO),
        );
        assert!(matches!(result, Err(SamplerError::ZeroInterval)));
    }

    #[test]
    fn test_refresh_at() {
        let (_, sampler) = setup(SamplerConfig::default());
        let later = noon() + chrono::Duration::minutes(36);
        assert!(sampler.refresh_at(later));
        assert_eq!(sampler.current().timestamp(), later);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_clock() {
        let (clock, sampler) = setup(SamplerConfig::default());
        sampler.start(Some(Duration::from_secs(1))).unwrap();
        assert!(sampler.is_running());

        clock.advance_decimal(DecimalDuration::from_seconds(155.5));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let current = sampler.current();
        assert_eq!(current.hours(), 5);
        assert_eq!(current.minutes(), 1);
        assert_eq!(current.seconds(), 55);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_updates_after_stop() {
        let (clock, sampler) = setup(SamplerConfig::default());
        sampler.start(None).unwrap();
        sampler.stop();
        assert_eq!(sampler.state(), SamplerState::Stopped);

        let before = sampler.current();
        clock.advance(chrono::Duration::hours(1));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sampler.current(), before);

        // Idempotent
        sampler.stop();
        assert!(!sampler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_interval() {
        let (_, sampler) = setup(SamplerConfig::default());
        sampler.start(None).unwrap();
        sampler.start(Some(Duration::from_secs(2))).unwrap();
        assert_eq!(sampler.interval(), Duration::from_secs(2));
        assert!(sampler.is_running());

        // Restarting without an interval keeps the last one
        sampler.stop();
        sampler.start(None).unwrap();
        assert_eq!(sampler.interval(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_immediately() {
        let (_, sampler) = setup(SamplerConfig {
            start_immediately: true,
            ..Default::default()
        });
        assert!(sampler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_keeps_previous_instant() {
        let clock = Arc::new(ManualClock::new(noon()));
        let calendar = Arc::new(FlakyCalendar::default());
        let sampler = PeriodicSampler::from_clock(
            clock.clone(),
            calendar.clone(),
            SamplerConfig::with_interval(Duration::from_secs(1)),
        )
        .unwrap();
        sampler.start(None).unwrap();

        let before = sampler.current();
        calendar.failing.store(true, Ordering::SeqCst);
        clock.advance(chrono::Duration::minutes(10));
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(sampler.is_running());
        assert_eq!(sampler.current(), before);
        assert!(!sampler.refresh());

        // Recovers once the calendar does
        calendar.failing.store(false, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(sampler.current().timestamp(), clock.now());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_updates() {
        let (clock, sampler) = setup(SamplerConfig::with_interval(Duration::from_secs(1)));
        let mut updates = sampler.subscribe();
        sampler.start(None).unwrap();

        clock.advance_decimal(DecimalDuration::HOUR);
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().hours(), 6);
    }

    #[test]
    fn test_refreshes_use_given_calendar() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(noon()));
        let initial = DecimalInstant::now(clock.as_ref(), Arc::new(UtcCalendar::utc())).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let sampler = PeriodicSampler::new(
            initial,
            clock,
            Arc::new(FixedOffsetCalendar::fixed(tokyo)),
            SamplerConfig::default(),
        )
        .unwrap();
        assert_eq!(sampler.current().hours(), 5);

        // Noon UTC is 21:00 at +09:00, i.e. 8.75 decimal hours
        assert!(sampler.refresh());
        assert_eq!(sampler.current().hours(), 8);
        assert_eq!(sampler.current().minutes(), 75);
        assert_eq!(sampler.current().calendar().name(), "+09:00");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sampler_usable_while_update_is_borrowed() {
        let (_, sampler) = setup(SamplerConfig::with_interval(Duration::from_millis(5)));
        let updates = sampler.subscribe();
        sampler.start(None).unwrap();

        {
            let held = updates.borrow();
            // Ticks keep firing and block on the channel while the borrow is held
            std::thread::sleep(Duration::from_millis(50));
            assert_eq!(sampler.current().hours(), held.hours());
            assert!(sampler.is_running());
            sampler.stop();
            assert_eq!(sampler.state(), SamplerState::Stopped);
        }

        assert_eq!(updates.borrow().hours(), 5);
    }
}
