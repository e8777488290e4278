//! `des-sim` — the event-driven dispatch loop of the rust_des kernel.
//!
//! # Dispatch loop
//!
//! ```text
//! while next event due ≤ horizon:
//!   ① Advance  — pop the (due, sequence)-smallest event; clock = due.
//!   ② Resume   — run the woken process to its next suspend point:
//!                  Wait(d)           → schedule at now + d
//!                  Request(pool)     → granted: keep running
//!                                      saturated: park in the waiter queue
//!                  Complete          → release held units, drop the logic
//!   ③ Register — spawned processes are scheduled to start at now.
//! ```
//!
//! Any error from a process or the kernel aborts the run with
//! [`SimError::Process`], which carries the clock time.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use des_core::SimConfig;
//! use des_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::new(480.0, 30)?)
//!     .pools(pools)
//!     .spawn(generator)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! for sample in sim.samples() { /* ... */ }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod table;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{RunReport, StopReason};
pub use sim::Sim;
pub use table::ProcessTable;
