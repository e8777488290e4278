//! Flat row types written by output backends.

use des_process::Sample;
use des_sim::{RunReport, StopReason};

use crate::Summary;

/// One completed pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub process_id:   u32,
    pub spawned_at:   f64,
    pub completed_at: f64,
    pub elapsed:      f64,
}

impl From<&Sample> for SampleRow {
    fn from(sample: &Sample) -> Self {
        Self {
            process_id:   sample.process.0,
            spawned_at:   sample.spawned_at.as_f64(),
            completed_at: sample.completed_at.as_f64(),
            elapsed:      sample.elapsed,
        }
    }
}

/// End-of-run counters plus elapsed-time statistics.
///
/// Statistics are `None` when nothing completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub stop:       &'static str,
    pub final_time: f64,
    pub events:     u64,
    pub spawned:    u64,
    pub completed:  u64,
    pub suspended:  u64,
    pub mean:       Option<f64>,
    pub min:        Option<f64>,
    pub max:        Option<f64>,
    pub p50:        Option<f64>,
    pub p90:        Option<f64>,
    pub p95:        Option<f64>,
}

impl SummaryRow {
    pub fn new(report: &RunReport, summary: Option<&Summary>) -> Self {
        Self {
            stop: match report.stop {
                StopReason::Horizon   => "horizon",
                StopReason::Exhausted => "exhausted",
            },
            final_time: report.final_time.as_f64(),
            events:     report.events,
            spawned:    report.spawned as u64,
            completed:  report.completed as u64,
            suspended:  report.suspended as u64,
            mean:       summary.map(|s| s.mean),
            min:        summary.map(|s| s.min),
            max:        summary.map(|s| s.max),
            p50:        summary.map(|s| s.p50),
            p90:        summary.map(|s| s.p90),
            p95:        summary.map(|s| s.p95),
        }
    }
}
