//! Virtual time model.
//!
//! # Design
//!
//! Time is a non-negative, finite `f64` wrapped in `SimTime`.  The unit is
//! whatever the model says it is (the cinema demo uses minutes); the kernel
//! never converts to wall-clock time.
//!
//! `SimTime` is totally ordered: construction rejects NaN and infinities, and
//! `-0.0` is normalised to `0.0`, so `f64::total_cmp` agrees with `==`.
//!
//! The `Clock` only moves forward.  It is advanced exclusively by the event
//! queue when an event is popped.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in virtual time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Validate and wrap a raw time value.
    pub fn new(value: f64) -> CoreResult<SimTime> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidSimTime(value));
        }
        // Collapse -0.0 so total ordering matches equality.
        Ok(SimTime(if value == 0.0 { 0.0 } else { value }))
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// The time `delay` units after `self`.
    ///
    /// Returns `None` if `delay` is negative or NaN, or if the sum overflows
    /// to infinity.
    #[inline]
    pub fn after(self, delay: f64) -> Option<SimTime> {
        if delay.is_nan() || delay < 0.0 {
            return None;
        }
        SimTime::new(self.0 + delay).ok()
    }

    /// Units elapsed from `earlier` to `self`.  Negative if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonically non-decreasing virtual clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    now: SimTime,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Jump to `to`.  Staying at the same instant is allowed; moving backwards
    /// is not.
    pub fn advance_to(&mut self, to: SimTime) -> CoreResult<()> {
        if to < self.now {
            return Err(CoreError::ClockRegression { from: self.now, to });
        }
        self.now = to;
        Ok(())
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.now)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically assembled by the application from CLI flags or a scenario file
/// and handed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Virtual-time cutoff.  Events due at exactly `horizon` still fire.
    pub horizon: SimTime,

    /// Seed for the run's single random stream.  The same seed always
    /// produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Build a validated configuration.
    pub fn new(horizon: f64, seed: u64) -> CoreResult<Self> {
        let config = Self { horizon: SimTime::new(horizon)?, seed };
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero horizon (nothing would ever run past the start events).
    ///
    /// Also re-checks the raw value, since deserialized configs bypass
    /// `SimTime::new`.
    pub fn validate(&self) -> CoreResult<()> {
        let horizon = SimTime::new(self.horizon.as_f64())?;
        if horizon <= SimTime::ZERO {
            return Err(CoreError::Config(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        Ok(())
    }
}
