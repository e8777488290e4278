//! The printed result: one line per customer, then the totals.

use std::io::{self, Write};

use des_output::Summary;
use des_process::Sample;

const RULE: &str = "---------------------------------------------";

/// Split a duration in minutes into whole minutes and rounded seconds.
pub fn minutes_seconds(minutes: f64) -> (u64, u64) {
    let whole = minutes.trunc();
    let seconds = ((minutes - whole) * 60.0).round() as u64;
    if seconds == 60 {
        (whole as u64 + 1, 0)
    } else {
        (whole as u64, seconds)
    }
}

pub fn write_report<W: Write>(out: &mut W, samples: &[Sample], horizon: f64) -> io::Result<()> {
    for (n, sample) in samples.iter().enumerate() {
        writeln!(out, "customer {} : {:.2} minutes", n + 1, sample.elapsed)?;
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, "There are {} customers during {horizon} minutes simulation", samples.len())?;
    match Summary::from_samples(samples) {
        Some(summary) => {
            let (mins, secs) = minutes_seconds(summary.mean);
            writeln!(out, "The average waiting time for customer is {mins} minutes and {secs} seconds.")
        }
        None => writeln!(out, "No customer reached the cinema hall within the simulation."),
    }
}
