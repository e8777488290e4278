//! Fluent builder for constructing a [`Sim`].

use des_core::{SimConfig, SimTime};
use des_process::{Kernel, Process};
use des_resource::ResourcePools;
use tracing::debug;

use crate::{ProcessTable, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon and seed.
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.pools(p)`     | No pools                         |
/// | `.spawn(proc)`  | No processes (the run is empty)  |
///
/// # Example
///
/// ```rust,ignore
/// let mut pools = ResourcePools::new();
/// let staff = pools.add("staff", 2)?;
/// let customer = Pipeline::builder("customer")
///     .hold("purchase", staff, Dist::uniform_int(1, 4))
///     .build()?;
///
/// let mut sim = SimBuilder::new(SimConfig::new(30.0, 30)?)
///     .pools(pools)
///     .spawn(ArrivalGenerator::new(customer, Dist::uniform(10.0 / 60.0, 20.0 / 60.0)))
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    pools:     ResourcePools,
    processes: Vec<Box<dyn Process>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, pools: ResourcePools::new(), processes: Vec::new() }
    }

    /// Supply the run's resource pools.  Replaces any previously given set.
    pub fn pools(mut self, pools: ResourcePools) -> Self {
        self.pools = pools;
        self
    }

    /// Add a process that starts at t=0.  Processes start in the order they
    /// were added.
    pub fn spawn(mut self, process: impl Process + 'static) -> Self {
        self.processes.push(Box::new(process));
        self
    }

    /// Validate the configuration, seed the random stream, and schedule every
    /// initial process at t=0.
    pub fn build(self) -> SimResult<Sim> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut kernel = Kernel::new(self.config.seed, self.pools);
        let mut table = ProcessTable::new();
        for process in self.processes {
            debug!(label = process.label(), "initial process");
            let id = table.insert(process, SimTime::ZERO)?;
            kernel
                .queue
                .schedule(SimTime::ZERO, id)
                .map_err(|e| SimError::Process { at: SimTime::ZERO, source: e.into() })?;
        }

        Ok(Sim::from_parts(self.config, kernel, table))
    }
}
