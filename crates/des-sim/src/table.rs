//! `ProcessTable` — per-process lifecycle state, stored column-wise.
//!
//! Indexed by `ProcessId`; ids are assigned densely in spawn order and never
//! reused within a run.  The logic slot is emptied when a process completes
//! so its state machine can be dropped while its bookkeeping survives for the
//! run report.

use des_core::{ProcessId, SimTime};
use des_process::{Process, ProcessState};

use crate::{SimError, SimResult};

#[derive(Default)]
pub struct ProcessTable {
    states:     Vec<ProcessState>,
    spawned_at: Vec<SimTime>,
    logic:      Vec<Option<Box<dyn Process>>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new runnable process and return its id.
    pub fn insert(&mut self, process: Box<dyn Process>, spawned_at: SimTime) -> SimResult<ProcessId> {
        let id = ProcessId::try_from(self.states.len())
            .map_err(|_| SimError::TooManyProcesses(self.states.len()))?;
        self.states.push(ProcessState::Runnable);
        self.spawned_at.push(spawned_at);
        self.logic.push(Some(process));
        Ok(id)
    }

    /// Number of processes ever spawned.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: ProcessId) -> Option<ProcessState> {
        self.states.get(id.index()).copied()
    }

    pub fn spawned_at(&self, id: ProcessId) -> Option<SimTime> {
        self.spawned_at.get(id.index()).copied()
    }

    pub(crate) fn set_state(&mut self, id: ProcessId, state: ProcessState) {
        if let Some(slot) = self.states.get_mut(id.index()) {
            *slot = state;
        }
    }

    /// Move the state machine out for one logic segment.
    pub(crate) fn take_logic(&mut self, id: ProcessId) -> Option<Box<dyn Process>> {
        self.logic.get_mut(id.index()).and_then(Option::take)
    }

    pub(crate) fn put_logic(&mut self, id: ProcessId, process: Box<dyn Process>) {
        if let Some(slot) = self.logic.get_mut(id.index()) {
            *slot = Some(process);
        }
    }

    pub fn completed(&self) -> usize {
        self.states.iter().filter(|s| **s == ProcessState::Completed).count()
    }

    /// `(id, state)` for every process, in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, ProcessState)> + '_ {
        self.states.iter().enumerate().map(|(i, &s)| (ProcessId(i as u32), s))
    }
}
