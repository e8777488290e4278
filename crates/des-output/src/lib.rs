//! `des-output` — run output for the rust_des kernel.
//!
//! | Backend | Files created                  |
//! |---------|--------------------------------|
//! | CSV     | `samples.csv`, `summary.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `des_sim::SimObserver`.
//! [`Summary`] aggregates elapsed times for callers that only want numbers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use des_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{SampleRow, SummaryRow};
pub use summary::Summary;
pub use writer::OutputWriter;
