//! Decimal Time Sampler
//!
//! Keeps a [`DecimalInstant`](dectime_instant::DecimalInstant) in step with a
//! clock by re-deriving it on a fixed cadence:
//!
//! - **Stopped**: the held instant only changes through explicit refreshes
//! - **Running**: a tokio interval task refreshes it from the clock every tick
//!
//! Ticks that fail to build an instant (e.g. the calendar cannot resolve the
//! day) are skipped and the previous instant is kept.

pub mod config;
pub mod error;
pub mod sampler;

pub use config::SamplerConfig;
pub use error::{SamplerError, SamplerResult};
pub use sampler::{PeriodicSampler, SamplerState};
