//! The `Sim` struct and its dispatch loop.

use des_core::{ProcessId, SimConfig, SimTime};
use des_process::{
    Kernel, MetricsSink, Process, ProcessError, ProcessResult, ProcessState, Sample, Step, Suspension,
};
use des_resource::{Acquire, ResourcePools};
use tracing::{debug, info, trace, warn};

use crate::{ProcessTable, RunReport, SimError, SimObserver, SimResult, StopReason};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each iteration of the loop:
///
/// 1. **Peek**: stop if the queue is empty or the next event is past the
///    horizon.
/// 2. **Advance**: pop the event; the clock moves to its due time.
/// 3. **Resume**: run the woken process until its next suspend point.  A
///    request that is granted on the spot does not suspend, so the process
///    keeps running within the same event.
/// 4. **Register**: processes spawned during the segment are added to the
///    table and scheduled to start at the current instant.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Horizon and seed.
    pub config: SimConfig,

    kernel:       Kernel,
    table:        ProcessTable,
    events:       u64,
    samples_seen: usize,
}

impl Sim {
    pub(crate) fn from_parts(config: SimConfig, kernel: Kernel, table: ProcessTable) -> Self {
        Self { config, kernel, table, events: 0, samples_seen: 0 }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.horizon`.
    ///
    /// Calls observer hooks as the loop progresses.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        self.run_until(self.config.horizon, observer)
    }

    /// Dispatch every event due at or before `horizon`.
    ///
    /// May be called repeatedly with increasing horizons to step a run
    /// incrementally.  Processes still suspended at the stop are left in
    /// place; this is the normal end of a finite run, not an error.
    pub fn run_until<O: SimObserver>(
        &mut self,
        horizon:  SimTime,
        observer: &mut O,
    ) -> SimResult<RunReport> {
        info!(
            %horizon,
            seed      = self.config.seed,
            processes = self.table.len(),
            pending   = self.kernel.queue.len(),
            "simulation started"
        );

        let stop = loop {
            match self.kernel.queue.peek_due() {
                None => break StopReason::Exhausted,
                Some(due) if due > horizon => break StopReason::Horizon,
                Some(_) => {}
            }

            let event = match self.kernel.queue.advance() {
                Ok(event) => event,
                Err(e) => return Err(self.fatal(e.into())),
            };
            self.events += 1;
            trace!(process = %event.process, due = %event.due, seq = event.sequence, "dispatch");
            observer.on_event(&event);

            self.dispatch(event.process)?;
            self.register_spawned(observer)?;
            self.publish_samples(observer);
        };

        let report = self.report(stop);
        if stop == StopReason::Exhausted {
            let blocked = self
                .table
                .iter()
                .filter(|(_, s)| matches!(s, ProcessState::Suspended(Suspension::ResourceWait(_))))
                .count();
            if blocked > 0 {
                warn!(blocked, "event queue drained with processes still waiting on pools");
            }
        }
        info!(%report, "simulation stopped");
        observer.on_sim_end(&report);
        Ok(report)
    }

    /// Current virtual time.
    pub fn now(&self) -> SimTime {
        self.kernel.now()
    }

    /// Completed samples, in completion order.
    pub fn samples(&self) -> &[Sample] {
        self.kernel.metrics.samples()
    }

    pub fn metrics(&self) -> &MetricsSink {
        &self.kernel.metrics
    }

    pub fn pools(&self) -> &ResourcePools {
        &self.kernel.pools
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.table
    }

    /// Events dispatched so far.
    pub fn events_processed(&self) -> u64 {
        self.events
    }

    /// Events scheduled but not yet dispatched.
    pub fn pending_events(&self) -> usize {
        self.kernel.queue.len()
    }

    /// Snapshot of the run's counters without advancing.
    pub fn report(&self, stop: StopReason) -> RunReport {
        let completed = self.table.completed();
        RunReport {
            stop,
            final_time: self.now(),
            events:     self.events,
            spawned:    self.table.len(),
            completed,
            suspended:  self.table.len() - completed,
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Resume one woken process and record the state it suspends in.
    fn dispatch(&mut self, id: ProcessId) -> SimResult<()> {
        let at = self.now();
        let stale = SimError::StaleWakeup { process: id, at };
        let (Some(state), Some(spawned_at)) = (self.table.state(id), self.table.spawned_at(id)) else {
            return Err(stale);
        };
        if state == ProcessState::Completed {
            return Err(stale);
        }
        let Some(mut logic) = self.table.take_logic(id) else {
            return Err(stale);
        };

        self.table.set_state(id, ProcessState::Runnable);
        match self.run_segment(id, spawned_at, logic.as_mut()) {
            Ok(ProcessState::Completed) => {
                debug!(process = %id, label = logic.label(), at = %at, "process completed");
                self.table.set_state(id, ProcessState::Completed);
            }
            Ok(state) => {
                self.table.set_state(id, state);
                self.table.put_logic(id, logic);
            }
            Err(source) => return Err(self.fatal(source)),
        }
        Ok(())
    }

    /// Drive `logic` from its current resume point to the next suspension.
    fn run_segment(
        &mut self,
        id:         ProcessId,
        spawned_at: SimTime,
        logic:      &mut dyn Process,
    ) -> ProcessResult<ProcessState> {
        loop {
            let step = logic.resume(&mut self.kernel.context(id, spawned_at))?;
            match step {
                Step::Wait(duration) => {
                    let event = self.kernel.queue.schedule_in(duration, id)?;
                    trace!(process = %id, duration, until = %event.due, "suspended on timer");
                    return Ok(ProcessState::Suspended(Suspension::Timer));
                }
                Step::Request(pool) => match self.kernel.pools.acquire(pool, id)? {
                    Acquire::Granted => {
                        trace!(process = %id, %pool, "unit granted");
                    }
                    Acquire::Queued { position } => {
                        trace!(process = %id, %pool, position, "suspended on pool");
                        return Ok(ProcessState::Suspended(Suspension::ResourceWait(pool)));
                    }
                },
                Step::Complete => {
                    self.kernel.release_all(id)?;
                    return Ok(ProcessState::Completed);
                }
            }
        }
    }

    /// Register processes spawned during the last segment and schedule them
    /// to start now.
    fn register_spawned<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        for process in self.kernel.take_spawned() {
            let label = process.label().to_owned();
            let id = self.table.insert(process, now)?;
            if let Err(e) = self.kernel.queue.schedule(now, id) {
                return Err(self.fatal(e.into()));
            }
            debug!(process = %id, label = %label, at = %now, "spawned");
            observer.on_spawn(id, now, &label);
        }
        Ok(())
    }

    fn publish_samples<O: SimObserver>(&mut self, observer: &mut O) {
        let samples = self.kernel.metrics.samples();
        for sample in &samples[self.samples_seen..] {
            observer.on_sample(sample);
        }
        self.samples_seen = samples.len();
    }

    fn fatal(&self, source: ProcessError) -> SimError {
        SimError::Process { at: self.now(), source }
    }
}
