//! `EventQueue` — pending wake-ups ordered by `(due, sequence)`.
//!
//! # Keys
//!
//! Events live in a `BTreeMap` keyed by `(SimTime, u64)`.  The sequence
//! counter never repeats within a run, so keys are unique and two wake-ups at
//! the same instant pop in scheduling order.  Insert and `pop_first` are both
//! O(log n).
//!
//! The queue also owns the run's [`Clock`]: popping an event is the only way
//! virtual time moves.

use std::collections::BTreeMap;

use des_core::{Clock, ProcessId, SimTime};

use crate::{ScheduleError, ScheduleResult};

/// One scheduled resumption of exactly one suspended process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub due:      SimTime,
    /// Tie-breaker assigned at schedule time.
    pub sequence: u64,
    pub process:  ProcessId,
}

/// A priority queue mapping `(due, sequence)` → the process to resume.
#[derive(Default)]
pub struct EventQueue {
    inner:    BTreeMap<(SimTime, u64), ProcessId>,
    next_seq: u64,
    clock:    Clock,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `process` to resume at absolute time `due`.
    ///
    /// Fails with `InvalidTime` if `due` is earlier than the clock.  Scheduling
    /// at exactly the current time is allowed; the event fires after every
    /// event already pending for this instant.
    pub fn schedule(&mut self, due: SimTime, process: ProcessId) -> ScheduleResult<Event> {
        let now = self.now();
        if due < now {
            return Err(ScheduleError::InvalidTime { due, now });
        }
        let sequence = self.next_seq;
        self.next_seq += 1;
        self.inner.insert((due, sequence), process);
        Ok(Event { due, sequence, process })
    }

    /// Schedule `process` to resume `delay` units from now.
    ///
    /// Fails with `InvalidDuration` for negative, NaN or overflowing delays.
    pub fn schedule_in(&mut self, delay: f64, process: ProcessId) -> ScheduleResult<Event> {
        let now = self.now();
        let due = now
            .after(delay)
            .ok_or(ScheduleError::InvalidDuration { duration: delay, now })?;
        self.schedule(due, process)
    }

    /// Remove the event with the smallest `(due, sequence)` and move the clock
    /// to its due time.
    ///
    /// Fails with `EmptyQueue` when nothing is pending.
    pub fn advance(&mut self) -> ScheduleResult<Event> {
        let ((due, sequence), process) =
            self.inner.pop_first().ok_or(ScheduleError::EmptyQueue)?;
        self.clock.advance_to(due)?;
        Ok(Event { due, sequence, process })
    }

    /// Due time of the next event, without removing it.
    pub fn peek_due(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(due, _)| due)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total events ever scheduled (the next sequence number).
    pub fn scheduled_total(&self) -> u64 {
        self.next_seq
    }
}
