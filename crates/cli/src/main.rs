//! Decimal clock command line
//!
//! Prints the current time in decimal time, once or continuously.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::FixedOffset;
use clap::{ArgAction, Parser};
use dectime_clock::{Calendar, Clock, FixedOffsetCalendar, LocalCalendar, SystemClock, UtcCalendar};
use dectime_instant::DecimalInstant;
use dectime_sampler::{PeriodicSampler, SamplerConfig};

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "decimal-clock", about = "Show the current time in decimal time.")]
struct Cli {
    /// Start days at midnight UTC instead of local midnight
    #[arg(long, conflicts_with = "offset")]
    utc: bool,

    /// Start days at midnight of a fixed UTC offset, e.g. +02:00
    #[arg(long, value_name = "OFFSET", allow_hyphen_values = true)]
    offset: Option<FixedOffset>,

    /// Keep running and print every update
    #[arg(long)]
    watch: bool,

    /// Update interval in milliseconds (one decimal second by default)
    #[arg(long, value_name = "MS", requires = "watch")]
    interval_ms: Option<u64>,

    /// Stop watching after this many updates
    #[arg(long, value_name = "N", requires = "watch")]
    ticks: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn calendar(&self) -> Arc<dyn Calendar> {
        match (self.utc, self.offset) {
            (true, _) => Arc::new(UtcCalendar::utc()),
            (false, Some(offset)) => Arc::new(FixedOffsetCalendar::fixed(offset)),
            (false, None) => Arc::new(LocalCalendar::local()),
        }
    }

    fn sampler_config(&self) -> SamplerConfig {
        let mut config = SamplerConfig::default();
        if let Some(ms) = self.interval_ms {
            config.interval = Duration::from_millis(ms);
        }
        config
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// One output line: decimal time followed by the calendar date
fn render(instant: &DecimalInstant) -> String {
    match instant.date_components() {
        Ok(date) => format!(
            "{:#}  {}-{:02}-{:02} (week {}, {})",
            instant, date.year, date.month, date.day, date.week_of_year, date.weekday
        ),
        Err(e) => {
            log::debug!("No date for {}: {}", instant, e);
            format!("{instant:#}")
        }
    }
}

async fn watch(
    clock: Arc<dyn Clock>,
    calendar: Arc<dyn Calendar>,
    config: SamplerConfig,
    max_ticks: Option<u64>,
) -> anyhow::Result<()> {
    let sampler = PeriodicSampler::from_clock(clock, calendar, config)?;
    let mut updates = sampler.subscribe();
    println!("{}", render(&sampler.current()));
    sampler.start(None)?;

    let mut seen = 0u64;
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let instant = updates.borrow_and_update().clone();
                println!("{}", render(&instant));
                seen += 1;
                if max_ticks.is_some_and(|max| seen >= max) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    sampler.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let calendar = cli.calendar();
    log::debug!("Using calendar {}", calendar.name());

    if cli.watch {
        watch(clock, calendar, cli.sampler_config(), cli.ticks).await
    } else {
        let instant = DecimalInstant::now(clock.as_ref(), calendar)
            .context("Cannot convert the current time")?;
        println!("{}", render(&instant));
        Ok(())
    }
}
