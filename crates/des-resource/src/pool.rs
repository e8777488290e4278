//! A single pool of interchangeable units.

use std::collections::{HashSet, VecDeque};

use des_core::ProcessId;
use tracing::trace;

use crate::{PoolError, PoolResult};

/// Outcome of [`ResourcePool::acquire`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Acquire {
    /// A unit was free and now belongs to the caller.  No suspension.
    Granted,
    /// The pool is saturated; the caller was appended to the waiter queue.
    /// `position` is its 0-based place in line.
    Queued { position: usize },
}

/// `capacity` interchangeable units, the processes holding them, and the
/// processes waiting for one (oldest first).
///
/// Invariants:
/// - `in_use() == holders.len() <= capacity`
/// - a waiter is only ever queued while the pool is full
/// - a freed unit goes to the head waiter before anyone else can take it
/// - `queued` holds exactly the ids in `waiters`
///
/// `holders` is bounded by `capacity`, so scanning it is cheap; waiter
/// membership goes through `queued` because the line can grow unbounded.
#[derive(Debug)]
pub struct ResourcePool {
    name:     String,
    capacity: usize,
    holders:  Vec<ProcessId>,
    waiters:  VecDeque<ProcessId>,
    queued:   HashSet<ProcessId>,
}

impl ResourcePool {
    pub fn new(name: impl Into<String>, capacity: usize) -> PoolResult<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(PoolError::ZeroCapacity { pool: name });
        }
        Ok(Self {
            name,
            capacity,
            holders: Vec::with_capacity(capacity),
            waiters: VecDeque::new(),
            queued: HashSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units currently held.
    pub fn in_use(&self) -> usize {
        self.holders.len()
    }

    pub fn available(&self) -> usize {
        self.capacity - self.holders.len()
    }

    /// Number of blocked processes.
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }

    pub fn holds(&self, process: ProcessId) -> bool {
        self.holders.contains(&process)
    }

    pub fn is_waiting(&self, process: ProcessId) -> bool {
        self.queued.contains(&process)
    }

    /// Blocked processes, longest-waiting first.
    pub fn waiters(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.waiters.iter().copied()
    }

    /// Take a unit if one is free, otherwise join the back of the line.
    pub fn acquire(&mut self, process: ProcessId) -> PoolResult<Acquire> {
        if self.holds(process) || self.is_waiting(process) {
            return Err(PoolError::AlreadyHeld { pool: self.name.clone(), process });
        }
        if self.holders.len() < self.capacity {
            self.holders.push(process);
            trace!(pool = %self.name, %process, in_use = self.in_use(), "unit granted");
            return Ok(Acquire::Granted);
        }
        let position = self.waiters.len();
        self.waiters.push_back(process);
        self.queued.insert(process);
        trace!(pool = %self.name, %process, position, "pool saturated; queued");
        Ok(Acquire::Queued { position })
    }

    /// Return `process`'s unit.
    ///
    /// If anyone is waiting, the unit passes directly to the head waiter,
    /// whose id is returned so the caller can schedule its resumption.
    pub fn release(&mut self, process: ProcessId) -> PoolResult<Option<ProcessId>> {
        let slot = self
            .holders
            .iter()
            .position(|&p| p == process)
            .ok_or_else(|| PoolError::ReleaseWithoutAcquire { pool: self.name.clone(), process })?;
        self.holders.swap_remove(slot);

        let next = self.waiters.pop_front();
        if let Some(next) = next {
            self.queued.remove(&next);
            self.holders.push(next);
            trace!(pool = %self.name, from = %process, to = %next, "unit handed off");
        }
        Ok(next)
    }
}
