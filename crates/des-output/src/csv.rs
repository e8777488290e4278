//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `samples.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, SampleRow, SummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    samples:  Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut samples = Writer::from_path(dir.join("samples.csv"))?;
        samples.write_record(["process_id", "spawned_at", "completed_at", "elapsed"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "stop", "final_time", "events", "spawned", "completed", "suspended",
            "mean", "min", "max", "p50", "p90", "p95",
        ])?;

        Ok(Self { samples, summary, finished: false })
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()> {
        for row in rows {
            self.samples.write_record(&[
                row.process_id.to_string(),
                row.spawned_at.to_string(),
                row.completed_at.to_string(),
                row.elapsed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.stop.to_string(),
            row.final_time.to_string(),
            row.events.to_string(),
            row.spawned.to_string(),
            row.completed.to_string(),
            row.suspended.to_string(),
            opt(row.mean),
            opt(row.min),
            opt(row.max),
            opt(row.p50),
            opt(row.p90),
            opt(row.p95),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
