//! The arrival generator, a long-lived process that spawns one pipeline per
//! arrival.

use des_core::DurationSampler;
use tracing::debug;

use crate::{Pipeline, Process, ProcessContext, ProcessResult, Step};

/// Repeatedly waits a drawn inter-arrival gap, then spawns a fresh
/// [`PipelineProcess`][crate::PipelineProcess] stamped with the current time.
///
/// The generator never completes; at the horizon it is abandoned mid-wait.
///
/// Optional extras:
/// - an initial population spawned at its first resume, before any gap (the
///   queue that is already waiting when the doors open);
/// - a fixed offset for the first arrival instead of a drawn gap.
pub struct ArrivalGenerator {
    pipeline:           Pipeline,
    gap:                Box<dyn DurationSampler>,
    initial_population: usize,
    first_arrival:      Option<f64>,
    started:            bool,
    arrivals:           u64,
}

impl ArrivalGenerator {
    pub fn new(pipeline: Pipeline, gap: impl DurationSampler + 'static) -> Self {
        Self {
            pipeline,
            gap:                Box::new(gap),
            initial_population: 0,
            first_arrival:      None,
            started:            false,
            arrivals:           0,
        }
    }

    /// Spawn `n` pipelines at the generator's first resume.
    pub fn with_initial_population(mut self, n: usize) -> Self {
        self.initial_population = n;
        self
    }

    /// Time of the first generated arrival, relative to the generator's start.
    pub fn first_arrival_at(mut self, offset: f64) -> Self {
        self.first_arrival = Some(offset);
        self
    }

    /// Pipelines spawned so far, including the initial population.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    fn spawn_one(&mut self, ctx: &mut ProcessContext<'_>) {
        ctx.spawn(self.pipeline.instantiate());
        self.arrivals += 1;
    }
}

impl Process for ArrivalGenerator {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
        if !self.started {
            self.started = true;
            for _ in 0..self.initial_population {
                self.spawn_one(ctx);
            }
            if self.initial_population > 0 {
                debug!(count = self.initial_population, at = %ctx.now(), "initial population spawned");
            }
            let first = match self.first_arrival {
                Some(offset) => offset,
                None => ctx.sample(&*self.gap),
            };
            return Ok(Step::Wait(first));
        }

        self.spawn_one(ctx);
        debug!(arrival = self.arrivals, at = %ctx.now(), pipeline = self.pipeline.name(), "arrival");
        Ok(Step::Wait(ctx.sample(&*self.gap)))
    }

    fn label(&self) -> &str {
        "arrivals"
    }
}
