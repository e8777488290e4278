//! cinema — movie-theater queueing on the rust_des kernel.
//!
//! Customers arrive every 10–20 seconds (plus an initial queue), decide on a
//! film, buy a ticket from the staff, maybe visit the food counter, and have
//! their ticket checked by the staff before entering the hall.  The report
//! lists every customer's time in the building and the average.
//!
//! ```text
//! cinema --staff 4 --counters 2 --customers 10 --horizon 60
//! RUST_LOG=des_sim=debug cinema --config scenario.json --output out/
//! ```

mod cli;
mod prompt;
mod report;
mod scenario;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use des_output::{CsvWriter, SimOutputObserver};
use des_sim::NoopObserver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use scenario::Scenario;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // 1. Defaults < scenario file < flags.
    let mut scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    scenario.apply_args(&args);
    scenario.validate()?;

    // 2. Prompt for anything still missing.
    if !args.no_prompt {
        let stdin = io::stdin();
        prompt::fill_missing(&mut scenario, &mut stdin.lock(), &mut io::stdout())?;
    }
    let settings = scenario.settings()?;
    info!(?settings, seed = scenario.seed, "scenario resolved");

    // 3. Run.
    let mut sim = scenario.build_sim()?;
    let run = match &args.output {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            let mut obs = SimOutputObserver::new(CsvWriter::new(dir)?);
            let run = sim.run(&mut obs)?;
            if let Some(e) = obs.take_error() {
                eprintln!("output error: {e}");
            }
            run
        }
        None => sim.run(&mut NoopObserver)?,
    };
    info!(%run, "run finished");

    // 4. Report.
    println!("{}\nSimulation is running.....\n", "-".repeat(45));
    report::write_report(&mut io::stdout().lock(), sim.samples(), settings.horizon)?;
    Ok(())
}
