//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, SampleRow, SummaryRow};

/// Sink for per-completion rows and the end-of-run summary.
///
/// The observer cannot propagate errors, so it stores the first one for
/// retrieval with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of completed samples.
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()>;

    /// Write the single summary row.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
