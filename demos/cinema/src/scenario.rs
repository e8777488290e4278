//! The cinema scenario: pool sizes, stage durations and arrival pattern.
//!
//! Every stage time is in minutes.  The defaults reproduce the classic
//! movie-theater exercise; a JSON file may override any field:
//!
//! ```json
//! {
//!   "staff": 3,
//!   "counters": 2,
//!   "arrival_gap": { "kind": "exponential", "mean": 0.25 }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use des_core::{Dist, SimConfig};
use des_process::{ArrivalGenerator, Pipeline, Stage};
use des_resource::ResourcePools;
use des_sim::{Sim, SimBuilder};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub staff:     Option<usize>,
    pub counters:  Option<usize>,
    pub customers: Option<usize>,
    pub horizon:   Option<f64>,
    pub seed:      u64,

    pub decide:          Dist,
    pub purchase:        Dist,
    pub buy_probability: f64,
    pub buy:             Dist,
    pub check:           Dist,
    pub arrival_gap:     Dist,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            staff:     None,
            counters:  None,
            customers: None,
            horizon:   None,
            seed:      30,

            decide:          Dist::uniform_int(1, 4),
            purchase:        Dist::uniform_int(1, 4),
            buy_probability: 0.5,
            buy:             Dist::uniform_int(1, 6),
            check:           Dist::uniform(5.0 / 60.0, 10.0 / 60.0),
            arrival_gap:     Dist::uniform(10.0 / 60.0, 20.0 / 60.0),
        }
    }
}

/// The four numbers every run needs, all known to be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub staff:     usize,
    pub counters:  usize,
    pub customers: usize,
    pub horizon:   f64,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario file {}", path.display()))
    }

    /// Overlay flags that were given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if args.staff.is_some() {
            self.staff = args.staff;
        }
        if args.counters.is_some() {
            self.counters = args.counters;
        }
        if args.customers.is_some() {
            self.customers = args.customers;
        }
        if args.horizon.is_some() {
            self.horizon = args.horizon;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
    }

    /// Reject values that are present but invalid.  Missing values are fine
    /// here; they are prompted for later.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("staff", self.staff),
            ("counters", self.counters),
            ("customers", self.customers),
        ] {
            if value == Some(0) {
                bail!("`{name}` must be a number > 0");
            }
        }
        if let Some(horizon) = self.horizon {
            ensure!(horizon.is_finite() && horizon > 0.0, "`horizon` must be a number > 0, got {horizon}");
        }
        ensure!(
            (0.0..=1.0).contains(&self.buy_probability),
            "`buy_probability` must be within [0, 1], got {}",
            self.buy_probability
        );
        for (name, dist) in [
            ("decide", &self.decide),
            ("purchase", &self.purchase),
            ("buy", &self.buy),
            ("check", &self.check),
            ("arrival_gap", &self.arrival_gap),
        ] {
            dist.validate().with_context(|| format!("`{name}` distribution"))?;
        }
        Ok(())
    }

    /// The resolved numbers, or an error naming the first one still missing.
    pub fn settings(&self) -> Result<Settings> {
        let missing = |name: &str| anyhow::anyhow!("`{name}` was not given (use --{name} or the scenario file)");
        Ok(Settings {
            staff:     self.staff.ok_or_else(|| missing("staff"))?,
            counters:  self.counters.ok_or_else(|| missing("counters"))?,
            customers: self.customers.ok_or_else(|| missing("customers"))?,
            horizon:   self.horizon.ok_or_else(|| missing("horizon"))?,
        })
    }

    /// Register the pools, assemble the customer pipeline and its arrival
    /// generator, and hand everything to a ready-to-run simulation.
    pub fn build_sim(&self) -> Result<Sim> {
        self.validate()?;
        let settings = self.settings()?;

        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", settings.staff)?;
        let counter = pools.add("counter", settings.counters)?;

        let customer = Pipeline::builder("customer")
            .delay("decide movie", self.decide.clone())
            .hold("purchase ticket", staff, self.purchase.clone())
            .maybe(self.buy_probability, Stage::hold("buy things", counter, self.buy.clone()))
            .hold("check ticket", staff, self.check.clone())
            .build()?;

        let arrivals = ArrivalGenerator::new(customer, self.arrival_gap.clone())
            .with_initial_population(settings.customers);

        let config = SimConfig::new(settings.horizon, self.seed)?;
        Ok(SimBuilder::new(config).pools(pools).spawn(arrivals).build()?)
    }
}
