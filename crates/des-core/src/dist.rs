//! Named duration distributions and the `DurationSampler` seam.
//!
//! Stage durations and inter-arrival gaps are anything that implements
//! [`DurationSampler`]: a [`Dist`] value, or any `Fn(&mut SimRng) -> f64`
//! closure.  Closures make it easy to inject a fixed sequence in tests.
//!
//! A `Dist` with invalid parameters draws `NaN` rather than panicking.  The
//! event queue rejects a NaN delay with `InvalidDuration`, so a bad
//! distribution aborts the run instead of being clamped.  Call
//! [`Dist::validate`] up front to catch this at configuration time.

use rand::Rng;
use rand_distr::{Distribution, Exp1, Triangular};

use crate::{CoreError, CoreResult, SimRng};

/// A named distribution over non-negative durations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Dist {
    /// Always the same value.
    Constant { value: f64 },

    /// Whole number drawn uniformly from `low..=high`.
    UniformInt { low: u32, high: u32 },

    /// Real number drawn uniformly from `[low, high)`.
    Uniform { low: f64, high: f64 },

    /// Exponential with the given mean (memoryless gaps → Poisson arrivals).
    Exponential { mean: f64 },

    /// Triangular on `[low, high]` peaking at `mode`.
    Triangular { low: f64, mode: f64, high: f64 },
}

impl Dist {
    pub fn constant(value: f64) -> Self {
        Dist::Constant { value }
    }

    pub fn uniform_int(low: u32, high: u32) -> Self {
        Dist::UniformInt { low, high }
    }

    pub fn uniform(low: f64, high: f64) -> Self {
        Dist::Uniform { low, high }
    }

    pub fn exponential(mean: f64) -> Self {
        Dist::Exponential { mean }
    }

    /// Check that every parameter is finite, non-negative and correctly ordered.
    pub fn validate(&self) -> CoreResult<()> {
        let ok = match *self {
            Dist::Constant { value } => value.is_finite() && value >= 0.0,
            Dist::UniformInt { low, high } => low <= high,
            Dist::Uniform { low, high } => {
                low.is_finite() && high.is_finite() && 0.0 <= low && low <= high
            }
            Dist::Exponential { mean } => mean.is_finite() && mean > 0.0,
            Dist::Triangular { low, mode, high } => {
                low.is_finite()
                    && high.is_finite()
                    && 0.0 <= low
                    && low <= mode
                    && mode <= high
                    && low < high
            }
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidDist(format!("{self:?}")))
        }
    }

    /// The distribution's mean, for sanity checks and reporting.
    pub fn mean(&self) -> f64 {
        match *self {
            Dist::Constant { value } => value,
            Dist::UniformInt { low, high } => (low as f64 + high as f64) / 2.0,
            Dist::Uniform { low, high } => (low + high) / 2.0,
            Dist::Exponential { mean } => mean,
            Dist::Triangular { low, mode, high } => (low + mode + high) / 3.0,
        }
    }

    pub(crate) fn draw(&self, rng: &mut SimRng) -> f64 {
        match *self {
            Dist::Constant { value } => value,
            Dist::UniformInt { low, high } => {
                if low > high {
                    return f64::NAN;
                }
                rng.inner().gen_range(low..=high) as f64
            }
            Dist::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
                    return f64::NAN;
                }
                rng.uniform_real(low, high)
            }
            Dist::Exponential { mean } => {
                let unit: f64 = Exp1.sample(rng.inner());
                mean * unit
            }
            Dist::Triangular { low, mode, high } => match Triangular::new(low, high, mode) {
                Ok(tri) => tri.sample(rng.inner()),
                Err(_) => f64::NAN,
            },
        }
    }
}

// ── DurationSampler ───────────────────────────────────────────────────────────

/// Anything that yields a duration given the run's random stream.
pub trait DurationSampler {
    fn sample(&self, rng: &mut SimRng) -> f64;
}

impl DurationSampler for Dist {
    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        self.draw(rng)
    }
}

impl<F> DurationSampler for F
where
    F: Fn(&mut SimRng) -> f64,
{
    #[inline]
    fn sample(&self, rng: &mut SimRng) -> f64 {
        self(rng)
    }
}
