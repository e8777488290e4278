//! `des-process` — cooperative processes and the state they share.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`process`]   | `Process` trait, `Step`, `ProcessState`, `Suspension`        |
//! | [`context`]   | `Kernel` (queue, pools, rng, metrics), `ProcessContext`      |
//! | [`pipeline`]  | `Stage`, `Pipeline`, `PipelineBuilder`, `PipelineProcess`    |
//! | [`arrival`]   | `ArrivalGenerator`                                           |
//! | [`metrics`]   | `Sample`, `MetricsSink`                                      |
//! | [`error`]     | `ProcessError`, `ProcessResult<T>`                           |
//!
//! # Execution model
//!
//! A process is an explicit state machine.  Each call to
//! [`Process::resume`] runs instantaneous logic and returns the next
//! suspend point as a [`Step`]:
//!
//! ```text
//! Step::Wait(d)      → resume again at now + d
//! Step::Request(p)   → resume immediately if pool p has a free unit,
//!                      otherwise when a release hands one over
//! Step::Complete     → never resumed again; held units are released
//! ```
//!
//! The driver (`des-sim`) owns the loop; this crate only defines what a
//! process may see and do between two suspend points.

pub mod arrival;
pub mod context;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod process;


pub use arrival::ArrivalGenerator;
pub use context::{Kernel, ProcessContext};
pub use error::{ProcessError, ProcessResult};
pub use metrics::{MetricsSink, Sample};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineProcess, Stage};
pub use process::{Process, ProcessState, Step, Suspension};
