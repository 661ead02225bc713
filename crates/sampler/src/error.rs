//! Error types for the sampler crate

use dectime_instant::InstantError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("No tokio runtime available to drive the sampler")]
    NoRuntime,

    #[error("Sampling interval must be greater than zero")]
    ZeroInterval,

    #[error("Cannot build initial instant: {0}")]
    Instant(#[from] InstantError),
}

pub type SamplerResult<T> = std::result::Result<T, SamplerError>;
