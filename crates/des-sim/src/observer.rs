//! Simulation observer trait for progress reporting and data collection.

use des_core::{ProcessId, SimTime};
use des_process::Sample;
use des_schedule::Event;

use crate::RunReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the dispatch loop
/// makes progress.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: completion printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_sample(&mut self, sample: &Sample) {
///         println!("{} finished after {:.2}", sample.process, sample.elapsed);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after an event is popped and the clock moved, before the
    /// process resumes.
    fn on_event(&mut self, _event: &Event) {}

    /// Called when a process is registered, with its label.
    fn on_spawn(&mut self, _process: ProcessId, _at: SimTime, _label: &str) {}

    /// Called once per sample, in completion order.
    fn on_sample(&mut self, _sample: &Sample) {}

    /// Called once when the dispatch loop halts normally.
    fn on_sim_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
