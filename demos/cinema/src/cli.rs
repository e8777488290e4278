//! Command-line flags.  Anything left unset falls back to the scenario file,
//! then to the built-in cinema defaults, then to a prompt on stdin.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "cinema")]
#[command(about = "Movie-theater queueing simulation: how long do customers wait before the film?")]
#[command(version)]
pub struct Args {
    /// Staff selling and checking tickets
    #[arg(long)]
    pub staff: Option<usize>,

    /// Food and goodies counters
    #[arg(long)]
    pub counters: Option<usize>,

    /// Customers already queued when the doors open
    #[arg(long)]
    pub customers: Option<usize>,

    /// Simulation duration in minutes
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Seed for the random stream
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON scenario file (capacities, durations, seed)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for samples.csv and summary.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail instead of prompting for missing values
    #[arg(long)]
    pub no_prompt: bool,
}
