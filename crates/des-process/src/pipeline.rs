//! Stage pipelines: the ordered work one arrival performs from spawn to
//! completion.
//!
//! A [`Pipeline`] is an immutable, cheaply clonable list of [`Stage`]s.  Each
//! arrival runs its own [`PipelineProcess`], which walks the stages strictly
//! forward:
//!
//! ```text
//! Delay { d }        → Wait(d)
//! Hold { pool, d }   → Request(pool) → Wait(d) → release(pool)
//! Maybe { p, stage } → with probability p run `stage`, otherwise skip it
//! end of list        → record Sample, Complete
//! ```
//!
//! A `Hold` stage always releases its unit before the next stage begins, so
//! units never leak from one stage into another.

use std::fmt;
use std::rc::Rc;

use des_core::{DurationSampler, PoolId};
use tracing::{debug, trace};

use crate::{Process, ProcessContext, ProcessError, ProcessResult, Step};

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One step of a pipeline.
pub enum Stage {
    /// Spend a drawn duration without any resource.
    Delay {
        name:     String,
        duration: Box<dyn DurationSampler>,
    },

    /// Hold one unit of `pool` for a drawn duration.
    Hold {
        name:     String,
        pool:     PoolId,
        duration: Box<dyn DurationSampler>,
    },

    /// Run `stage` with probability `probability`, otherwise skip it.
    Maybe {
        probability: f64,
        stage:       Box<Stage>,
    },
}

impl Stage {
    pub fn delay(name: impl Into<String>, duration: impl DurationSampler + 'static) -> Self {
        Stage::Delay { name: name.into(), duration: Box::new(duration) }
    }

    pub fn hold(
        name:     impl Into<String>,
        pool:     PoolId,
        duration: impl DurationSampler + 'static,
    ) -> Self {
        Stage::Hold { name: name.into(), pool, duration: Box::new(duration) }
    }

    pub fn maybe(probability: f64, stage: Stage) -> Self {
        Stage::Maybe { probability, stage: Box::new(stage) }
    }

    pub fn name(&self) -> &str {
        match self {
            Stage::Delay { name, .. } | Stage::Hold { name, .. } => name,
            Stage::Maybe { stage, .. } => stage.name(),
        }
    }

    fn validate(&self) -> ProcessResult<()> {
        if let Stage::Maybe { probability, stage } = self {
            if !(0.0..=1.0).contains(probability) {
                return Err(ProcessError::InvalidStage(format!(
                    "`{}`: probability {probability} is outside [0, 1]",
                    stage.name()
                )));
            }
            if matches!(**stage, Stage::Maybe { .. }) {
                return Err(ProcessError::InvalidStage(format!(
                    "`{}`: optional stages cannot be nested",
                    stage.name()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Delay { name, .. } => f.debug_struct("Delay").field("name", name).finish(),
            Stage::Hold { name, pool, .. } => f
                .debug_struct("Hold")
                .field("name", name)
                .field("pool", pool)
                .finish(),
            Stage::Maybe { probability, stage } => f
                .debug_struct("Maybe")
                .field("probability", probability)
                .field("stage", stage)
                .finish(),
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// A validated, shareable stage list.  Cloning is an `Rc` bump.
#[derive(Clone, Debug)]
pub struct Pipeline {
    name:   Rc<str>,
    stages: Rc<[Stage]>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder { name: name.into(), stages: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// A fresh process that runs this pipeline from the first stage.
    pub fn instantiate(&self) -> PipelineProcess {
        PipelineProcess { pipeline: self.clone(), stage: 0, phase: Phase::Enter }
    }
}

/// Fluent builder for [`Pipeline`].
///
/// # Example
///
/// ```rust,ignore
/// let customer = Pipeline::builder("customer")
///     .delay("decide", Dist::uniform_int(1, 4))
///     .hold("purchase", staff, Dist::uniform_int(1, 4))
///     .maybe(0.5, Stage::hold("buy", counter, Dist::uniform_int(1, 6)))
///     .hold("check", staff, Dist::uniform(5.0 / 60.0, 10.0 / 60.0))
///     .build()?;
/// ```
pub struct PipelineBuilder {
    name:   String,
    stages: Vec<Stage>,
}

impl PipelineBuilder {
    pub fn delay(self, name: impl Into<String>, duration: impl DurationSampler + 'static) -> Self {
        self.stage(Stage::delay(name, duration))
    }

    pub fn hold(
        self,
        name:     impl Into<String>,
        pool:     PoolId,
        duration: impl DurationSampler + 'static,
    ) -> Self {
        self.stage(Stage::hold(name, pool, duration))
    }

    pub fn maybe(self, probability: f64, stage: Stage) -> Self {
        self.stage(Stage::maybe(probability, stage))
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Validate branch probabilities and nesting.
    ///
    /// Pool ids are not checked here; an unknown pool fails at the first
    /// request with `UnknownPool`.
    pub fn build(self) -> ProcessResult<Pipeline> {
        for stage in &self.stages {
            stage.validate()?;
        }
        Ok(Pipeline { name: self.name.into(), stages: self.stages.into() })
    }
}

// ── PipelineProcess ───────────────────────────────────────────────────────────

/// Where a pipeline process is within its current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// About to start `stage` (or finish, if past the end).
    Enter,
    /// Sleeping through a `Delay`.
    Delaying,
    /// Requested a unit; the next resume means it was granted.
    Acquiring(PoolId),
    /// Holding a unit for the stage duration.
    Holding(PoolId),
}

/// One arrival's walk through a [`Pipeline`].
pub struct PipelineProcess {
    pipeline: Pipeline,
    stage:    usize,
    phase:    Phase,
}

impl PipelineProcess {
    fn next_stage(&mut self) {
        self.stage += 1;
        self.phase = Phase::Enter;
    }
}

/// The stage that actually runs at `stage`: the inner stage of a taken `Maybe`.
fn active(stage: &Stage) -> &Stage {
    match stage {
        Stage::Maybe { stage, .. } => stage,
        other => other,
    }
}

impl Process for PipelineProcess {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
        let stages = Rc::clone(&self.pipeline.stages);
        loop {
            match self.phase {
                Phase::Enter => {
                    let Some(stage) = stages.get(self.stage) else {
                        let sample = ctx.record_sample();
                        debug!(
                            process = %ctx.process(),
                            pipeline = %self.pipeline.name,
                            elapsed = sample.elapsed,
                            "pipeline completed"
                        );
                        return Ok(Step::Complete);
                    };

                    if let Stage::Maybe { probability, .. } = stage {
                        if !ctx.rng().gen_bool(*probability) {
                            trace!(process = %ctx.process(), stage = stage.name(), "stage skipped");
                            self.next_stage();
                            continue;
                        }
                    }

                    trace!(process = %ctx.process(), stage = stage.name(), "stage entered");
                    match active(stage) {
                        Stage::Delay { duration, .. } => {
                            self.phase = Phase::Delaying;
                            return Ok(Step::Wait(ctx.sample(&**duration)));
                        }
                        Stage::Hold { pool, .. } => {
                            self.phase = Phase::Acquiring(*pool);
                            return Ok(Step::Request(*pool));
                        }
                        Stage::Maybe { .. } => {
                            return Err(ProcessError::InvalidStage(format!(
                                "`{}`: optional stages cannot be nested",
                                stage.name()
                            )));
                        }
                    }
                }
                Phase::Delaying => self.next_stage(),
                Phase::Acquiring(pool) => {
                    let Stage::Hold { duration, .. } = active(&stages[self.stage]) else {
                        return Err(ProcessError::InvalidStage(format!(
                            "stage {} is not a hold stage",
                            self.stage
                        )));
                    };
                    self.phase = Phase::Holding(pool);
                    return Ok(Step::Wait(ctx.sample(&**duration)));
                }
                Phase::Holding(pool) => {
                    ctx.release(pool)?;
                    self.next_stage();
                }
            }
        }
    }

    fn label(&self) -> &str {
        &self.pipeline.name
    }
}
