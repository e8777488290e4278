//! Kernel-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where a core failure can surface through them.

use thiserror::Error;

use crate::SimTime;

/// The error type for `des-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid simulation time {0}: must be finite and non-negative")]
    InvalidSimTime(f64),

    #[error("clock cannot move backwards from {from} to {to}")]
    ClockRegression { from: SimTime, to: SimTime },

    #[error("invalid distribution: {0}")]
    InvalidDist(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `des-core`.
pub type CoreResult<T> = Result<T, CoreError>;
