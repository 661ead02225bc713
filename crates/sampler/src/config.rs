use dectime_core::DECIMAL_SECOND;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Time between refreshes (one decimal second by default)
    pub interval: Duration,
    /// Start sampling as soon as the sampler is built
    pub start_immediately: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DECIMAL_SECOND,
            start_immediately: false,
        }
    }
}

impl SamplerConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }
}
