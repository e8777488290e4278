//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use des_process::Sample;
use des_sim::{RunReport, SimObserver};

use crate::row::{SampleRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, Summary};

/// A [`SimObserver`] that streams each completed sample to an
/// [`OutputWriter`] and writes the summary row when the run stops.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    elapsed:    Vec<f64>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, elapsed: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Statistics over every sample seen so far.
    pub fn summary(&self) -> Option<Summary> {
        Summary::from_elapsed(self.elapsed.iter().copied())
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_sample(&mut self, sample: &Sample) {
        self.elapsed.push(sample.elapsed);
        let result = self.writer.write_samples(&[SampleRow::from(sample)]);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        let summary = self.summary();
        let result = self.writer.write_summary(&SummaryRow::new(report, summary.as_ref()));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
