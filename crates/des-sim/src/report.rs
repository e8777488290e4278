//! End-of-run summary returned by [`Sim::run`][crate::Sim::run].

use std::fmt;

use des_core::SimTime;

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The next pending event was due after the horizon.
    Horizon,
    /// No events were left.
    Exhausted,
}

/// Counts describing a finished (or paused) run.
///
/// `spawned == completed + suspended` always holds: every process that did
/// not complete is still parked on a timer or a pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub stop:       StopReason,
    /// Clock value at halt: the time of the last processed event.
    pub final_time: SimTime,
    /// Events dispatched since the simulation was built.
    pub events:     u64,
    pub spawned:    usize,
    pub completed:  usize,
    pub suspended:  usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stop = match self.stop {
            StopReason::Horizon   => "horizon",
            StopReason::Exhausted => "queue exhausted",
        };
        write!(
            f,
            "stopped ({stop}) at t={}: {} events, {} spawned, {} completed, {} suspended",
            self.final_time, self.events, self.spawned, self.completed, self.suspended
        )
    }
}
