//! `des-schedule` — the time-ordered event queue and the virtual clock.
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`event_queue`] | `Event`, `EventQueue` (`BTreeMap<(SimTime, seq), ProcessId>`) |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                |
//!
//! # Ordering model (summary)
//!
//! ```text
//! key      = (due, sequence)
//! sequence = monotonically increasing counter assigned at schedule time
//! advance  = pop smallest key, set clock = due
//! ```
//!
//! Events at distinct times fire in time order; events at the same time fire
//! in the order they were scheduled.  Nothing else in the kernel relies on
//! any other ordering property.

pub mod error;
pub mod event_queue;


pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::{Event, EventQueue};
