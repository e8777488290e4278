//! Per-completion samples collected during a run.

use des_core::{ProcessId, SimTime};

/// Time-in-system of one completed pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub process:      ProcessId,
    pub spawned_at:   SimTime,
    pub completed_at: SimTime,
    /// `completed_at - spawned_at`.
    pub elapsed:      f64,
}

/// Completed samples in completion order (not spawn order).
///
/// Owned by the driver for the lifetime of one run and read by the caller
/// after `run` returns.  Aggregation is left to the caller.
#[derive(Debug, Default)]
pub struct MetricsSink {
    samples: Vec<Sample>,
}

impl MetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Elapsed times in completion order.
    pub fn elapsed(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.elapsed)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
