//! Interactive fallback for settings that neither flags nor the scenario file
//! supplied.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Result, bail};

use crate::scenario::Scenario;

const RETRY: &str = "Try again. Please provide number > 0";

/// Numbers accepted at a prompt.
pub trait Positive: FromStr + Copy {
    fn is_positive(self) -> bool;
}

impl Positive for usize {
    fn is_positive(self) -> bool {
        self > 0
    }
}

impl Positive for f64 {
    fn is_positive(self) -> bool {
        self.is_finite() && self > 0.0
    }
}

/// Ask until the answer parses as a positive number.  Fails only when input
/// runs out.
pub fn ask<T, R, W>(input: &mut R, output: &mut W, question: &str) -> Result<T>
where
    T: Positive,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{question}: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for \"{question}\"");
        }
        match line.trim().parse::<T>() {
            Ok(value) if value.is_positive() => return Ok(value),
            _ => writeln!(output, "{RETRY}")?,
        }
    }
}

/// Prompt for each setting the scenario is still missing, in the order staff,
/// counters, customers, horizon.
pub fn fill_missing<R: BufRead, W: Write>(
    scenario: &mut Scenario,
    input:    &mut R,
    output:   &mut W,
) -> Result<()> {
    if scenario.staff.is_none() {
        scenario.staff = Some(ask(input, output, "Total staff")?);
    }
    if scenario.counters.is_none() {
        scenario.counters = Some(ask(input, output, "Total counters")?);
    }
    if scenario.customers.is_none() {
        scenario.customers = Some(ask(input, output, "Total customers in the queue")?);
    }
    if scenario.horizon.is_none() {
        scenario.horizon = Some(ask(input, output, "Simulation duration in minutes")?);
    }
    Ok(())
}
