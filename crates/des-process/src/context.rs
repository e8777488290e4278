//! Shared kernel state and the per-resume view a process gets of it.

use des_core::{DurationSampler, PoolId, ProcessId, SimRng, SimTime};
use des_resource::ResourcePools;
use des_schedule::EventQueue;
use tracing::{debug, trace};

use crate::{MetricsSink, Process, ProcessResult, Sample};

// ── Kernel ────────────────────────────────────────────────────────────────────

/// Everything a process can touch: the event queue (and clock), the resource
/// pools, the random stream, the metrics sink, and a buffer of processes
/// spawned during the current logic segment.
///
/// The driver owns one `Kernel` per run.
pub struct Kernel {
    pub queue:   EventQueue,
    pub pools:   ResourcePools,
    pub rng:     SimRng,
    pub metrics: MetricsSink,
    spawned:     Vec<Box<dyn Process>>,
}

impl Kernel {
    /// Seed the random stream and take ownership of the pools.
    pub fn new(seed: u64, pools: ResourcePools) -> Self {
        Self {
            queue:   EventQueue::new(),
            pools,
            rng:     SimRng::new(seed),
            metrics: MetricsSink::new(),
            spawned: Vec::new(),
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// Borrow the kernel on behalf of `process` for one logic segment.
    pub fn context(&mut self, process: ProcessId, spawned_at: SimTime) -> ProcessContext<'_> {
        ProcessContext { kernel: self, process, spawned_at }
    }

    /// Queue a process to be registered by the driver after the current
    /// segment.
    pub fn spawn(&mut self, process: Box<dyn Process>) {
        self.spawned.push(process);
    }

    /// Processes spawned since the last call, in spawn order.
    pub fn take_spawned(&mut self) -> Vec<Box<dyn Process>> {
        std::mem::take(&mut self.spawned)
    }

    /// Release a unit and, if a waiter received it, schedule that waiter to
    /// resume at the current instant.
    pub fn release(&mut self, pool: PoolId, process: ProcessId) -> ProcessResult<()> {
        if let Some(next) = self.pools.release(pool, process)? {
            let now = self.now();
            self.queue.schedule(now, next)?;
        }
        Ok(())
    }

    /// Release every unit `process` still holds.  Returns how many were freed.
    pub fn release_all(&mut self, process: ProcessId) -> ProcessResult<usize> {
        let now = self.now();
        let released = self.pools.release_all(process);
        for &(pool, next) in &released {
            debug!(%process, %pool, "releasing unit held at completion");
            if let Some(next) = next {
                self.queue.schedule(now, next)?;
            }
        }
        Ok(released.len())
    }
}

// ── ProcessContext ────────────────────────────────────────────────────────────

/// The mutable view of the kernel handed to [`Process::resume`].
///
/// Valid for one logic segment only.
pub struct ProcessContext<'a> {
    kernel:     &'a mut Kernel,
    process:    ProcessId,
    spawned_at: SimTime,
}

impl ProcessContext<'_> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.kernel.now()
    }

    /// The running process.
    #[inline]
    pub fn process(&self) -> ProcessId {
        self.process
    }

    #[inline]
    pub fn spawned_at(&self) -> SimTime {
        self.spawned_at
    }

    /// Time since this process was spawned.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.now().since(self.spawned_at)
    }

    #[inline]
    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.kernel.rng
    }

    /// Draw a duration from `sampler` using the run's random stream.
    #[inline]
    pub fn sample(&mut self, sampler: &dyn DurationSampler) -> f64 {
        sampler.sample(&mut self.kernel.rng)
    }

    pub fn pools(&self) -> &ResourcePools {
        &self.kernel.pools
    }

    /// Start a new process at the current instant.  It runs after every event
    /// already due now.
    pub fn spawn(&mut self, process: impl Process + 'static) {
        trace!(parent = %self.process, label = process.label(), "spawn requested");
        self.kernel.spawn(Box::new(process));
    }

    /// Give back a unit of `pool`.  Fails with `ReleaseWithoutAcquire` if this
    /// process does not hold one.
    pub fn release(&mut self, pool: PoolId) -> ProcessResult<()> {
        self.kernel.release(pool, self.process)
    }

    /// Append this process's time-in-system to the metrics sink.
    pub fn record_sample(&mut self) -> Sample {
        let completed_at = self.now();
        let sample = Sample {
            process:    self.process,
            spawned_at: self.spawned_at,
            completed_at,
            elapsed:    completed_at.since(self.spawned_at),
        };
        self.kernel.metrics.record(sample);
        sample
    }
}
