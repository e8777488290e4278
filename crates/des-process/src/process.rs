//! The `Process` trait: anything that runs in virtual time.

use des_core::PoolId;

use crate::{ProcessContext, ProcessResult};

/// The suspend point a process yields when its current logic segment ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Sleep for this many time units.  Must be finite and non-negative;
    /// anything else aborts the run with `InvalidDuration`.
    Wait(f64),

    /// Take one unit of a pool, blocking in FIFO order while it is saturated.
    Request(PoolId),

    /// Finished.  Any units still held are released by the driver.
    Complete,
}

/// Why a process is not running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// Waiting for a timer event.
    Timer,
    /// Blocked in a pool's waiter queue.
    ResourceWait(PoolId),
}

/// Lifecycle state tracked by the driver for each spawned process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Spawned and scheduled to start, or currently executing.
    Runnable,
    Suspended(Suspension),
    Completed,
}

/// A resumable computation with named suspend points.
///
/// The driver calls [`resume`][Self::resume] when the process starts and each
/// time one of its events fires.  The implementation advances its own state
/// machine, performs any instantaneous work through `ctx` (draws, spawns,
/// releases, recording a sample), and returns the next [`Step`].
///
/// `Step::Request` that is granted immediately does not suspend: the driver
/// calls `resume` again within the same event.
///
/// An `Err` aborts the whole run.
///
/// # Example
///
/// ```rust,ignore
/// struct Ticker { left: u32 }
///
/// impl Process for Ticker {
///     fn resume(&mut self, _ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
///         if self.left == 0 {
///             return Ok(Step::Complete);
///         }
///         self.left -= 1;
///         Ok(Step::Wait(1.0))
///     }
/// }
/// ```
pub trait Process {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step>;

    /// Short label for logs.
    fn label(&self) -> &str {
        "process"
    }
}

/// Closures are processes: handy for scripted one-off behaviour in tests.
impl<F> Process for F
where
    F: FnMut(&mut ProcessContext<'_>) -> ProcessResult<Step>,
{
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
        self(ctx)
    }
}
