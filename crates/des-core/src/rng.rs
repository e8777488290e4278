//! The run's single seeded random stream.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded once from `SimConfig::seed` when
//! the driver is built.  Every draw (inter-arrival gaps, stage durations,
//! branch coin flips) is taken from it in event order, and event order is
//! fully determined by `(due, sequence)`.  Two runs with the same seed and
//! configuration therefore consume the stream identically.
//!
//! The stream is passed explicitly to whoever needs a draw; there is no
//! process-wide generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Dist;

/// Simulation-level RNG.
///
/// Used only from the single-threaded dispatch loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Integer uniformly drawn from `low..=high`.
    ///
    /// # Panics
    /// Panics if `low > high`.
    #[inline]
    pub fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.0.gen_range(low..=high)
    }

    /// Real uniformly drawn from `[low, high)`; returns `low` when the range
    /// is empty.
    ///
    /// # Panics
    /// Panics if `low > high`.
    #[inline]
    pub fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        if low == high {
            return low;
        }
        self.0.gen_range(low..high)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Draw one value from a named distribution.
    #[inline]
    pub fn sample(&mut self, dist: &Dist) -> f64 {
        dist.draw(self)
    }
}
