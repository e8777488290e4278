//! Integration tests for des-sim.

use des_core::{Dist, PoolId, SimConfig, SimRng, SimTime};
use des_process::{
    ArrivalGenerator, Pipeline, Process, ProcessContext, ProcessError, ProcessResult, Sample, Stage, Step,
};
use des_resource::{PoolError, ResourcePools};
use des_schedule::{Event, ScheduleError};

use crate::{NoopObserver, RunReport, Sim, SimBuilder, SimError, SimObserver, StopReason};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(value: f64) -> SimTime {
    SimTime::new(value).unwrap()
}

fn config(horizon: f64, seed: u64) -> SimConfig {
    SimConfig::new(horizon, seed).unwrap()
}

fn hold_once(name: &str, pool: PoolId, duration: f64) -> Pipeline {
    Pipeline::builder(name)
        .hold("work", pool, Dist::constant(duration))
        .build()
        .unwrap()
}

/// The movie-theater customer: decide, buy a ticket, maybe visit the
/// counter, have the ticket checked.
fn cinema_sim(staff: usize, counters: usize, horizon: f64, seed: u64) -> Sim {
    let mut pools = ResourcePools::new();
    let staff = pools.add("staff", staff).unwrap();
    let counter = pools.add("counter", counters).unwrap();
    let customer = Pipeline::builder("customer")
        .delay("decide", Dist::uniform_int(1, 4))
        .hold("purchase", staff, Dist::uniform_int(1, 4))
        .maybe(0.5, Stage::hold("buy", counter, Dist::uniform_int(1, 6)))
        .hold("check", staff, Dist::uniform(5.0 / 60.0, 10.0 / 60.0))
        .build()
        .unwrap();
    let arrivals = ArrivalGenerator::new(customer, Dist::uniform(10.0 / 60.0, 20.0 / 60.0))
        .with_initial_population(3);

    SimBuilder::new(config(horizon, seed))
        .pools(pools)
        .spawn(arrivals)
        .build()
        .unwrap()
}

/// Arrivals every 3 units starting at t=1; each customer finishes instantly.
fn periodic_arrivals(horizon: f64) -> Sim {
    let instant = Pipeline::builder("instant").build().unwrap();
    let arrivals = ArrivalGenerator::new(instant, Dist::constant(3.0)).first_arrival_at(1.0);
    SimBuilder::new(config(horizon, 1)).spawn(arrivals).build().unwrap()
}

/// Waits, then releases a unit it never acquired.
struct BadRelease {
    pool:   PoolId,
    waited: bool,
}

impl Process for BadRelease {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
        if !self.waited {
            self.waited = true;
            return Ok(Step::Wait(1.5));
        }
        ctx.release(self.pool)?;
        Ok(Step::Complete)
    }
}

/// Takes a unit, works for one unit of time, then completes while still
/// holding it.
struct Greedy {
    pool:  PoolId,
    phase: u8,
}

impl Process for Greedy {
    fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> ProcessResult<Step> {
        self.phase += 1;
        match self.phase {
            1 => Ok(Step::Request(self.pool)),
            2 => Ok(Step::Wait(1.0)),
            _ => {
                ctx.record_sample();
                Ok(Step::Complete)
            }
        }
    }
}

#[derive(Default)]
struct Recorder {
    events:  Vec<Event>,
    spawns:  Vec<String>,
    samples: Vec<Sample>,
    end:     Option<RunReport>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, event: &Event) {
        self.events.push(*event);
    }

    fn on_spawn(&mut self, _process: des_core::ProcessId, _at: SimTime, label: &str) {
        self.spawns.push(label.to_owned());
    }

    fn on_sample(&mut self, sample: &Sample) {
        self.samples.push(*sample);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        self.end = Some(*report);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn zero_horizon_is_config_error() {
        let config = SimConfig { horizon: SimTime::ZERO, seed: 1 };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn empty_sim_exhausts_immediately() {
        let mut sim = SimBuilder::new(config(10.0, 1)).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(report.stop, StopReason::Exhausted);
        assert_eq!(report.events, 0);
        assert_eq!(report.final_time, SimTime::ZERO);
    }

    #[test]
    fn initial_processes_start_in_order_at_zero() {
        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", 1).unwrap();
        let sim = SimBuilder::new(config(10.0, 1))
            .pools(pools)
            .spawn(hold_once("first", staff, 1.0).instantiate())
            .spawn(hold_once("second", staff, 1.0).instantiate())
            .build()
            .unwrap();
        assert_eq!(sim.processes().len(), 2);
        assert_eq!(sim.pending_events(), 2);
        assert_eq!(sim.now(), SimTime::ZERO);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn two_pipelines_share_one_staff() {
        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", 1).unwrap();
        let mut sim = SimBuilder::new(config(100.0, 1))
            .pools(pools)
            .spawn(hold_once("p1", staff, 2.0).instantiate())
            .spawn(hold_once("p2", staff, 3.0).instantiate())
            .build()
            .unwrap();

        let report = sim.run(&mut NoopObserver).unwrap();

        let elapsed: Vec<f64> = sim.metrics().elapsed().collect();
        assert_eq!(elapsed, vec![2.0, 5.0]);
        assert_eq!(sim.samples()[0].process, des_core::ProcessId(0));
        assert_eq!(sim.samples()[1].completed_at, t(5.0));

        assert_eq!(report.stop, StopReason::Exhausted);
        assert_eq!(report.final_time, t(5.0));
        assert_eq!(report.events, 5);
        assert_eq!((report.spawned, report.completed, report.suspended), (2, 2, 0));
        assert_eq!(sim.pools().get(staff).unwrap().in_use(), 0);
    }

    #[test]
    fn horizon_truncates_arrivals() {
        let mut sim = periodic_arrivals(10.0);
        let report = sim.run(&mut NoopObserver).unwrap();

        let completed_at: Vec<SimTime> = sim.samples().iter().map(|s| s.completed_at).collect();
        assert_eq!(completed_at, vec![t(1.0), t(4.0), t(7.0), t(10.0)]);

        assert_eq!(report.stop, StopReason::Horizon);
        // Clock stays at the last processed event, not the horizon.
        assert_eq!(report.final_time, t(10.0));
        assert_eq!(report.spawned, 5);
        assert_eq!(report.completed, 4);
        // Only the generator is left, parked until t=13.
        assert_eq!(report.suspended, 1);
        assert_eq!(sim.pending_events(), 1);
    }

    #[test]
    fn run_until_steps_incrementally() {
        let mut sim = periodic_arrivals(10.0);
        let first = sim.run_until(t(4.0), &mut NoopObserver).unwrap();
        assert_eq!(first.completed, 2);
        assert_eq!(first.final_time, t(4.0));

        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(second.completed, 4);

        let mut whole = periodic_arrivals(10.0);
        let once = whole.run(&mut NoopObserver).unwrap();
        assert_eq!(once, second);
    }

    #[test]
    fn waiters_served_first_come_first_served() {
        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", 1).unwrap();
        let mut builder = SimBuilder::new(config(100.0, 1)).pools(pools);
        for name in ["a", "b", "c", "d"] {
            builder = builder.spawn(hold_once(name, staff, 1.0).instantiate());
        }
        let mut sim = builder.build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let order: Vec<(u32, f64)> = sim
            .samples()
            .iter()
            .map(|s| (s.process.0, s.completed_at.as_f64()))
            .collect();
        assert_eq!(order, vec![(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)]);
    }

    #[test]
    fn completion_releases_units_still_held() {
        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", 1).unwrap();
        let mut sim = SimBuilder::new(config(100.0, 1))
            .pools(pools)
            .spawn(Greedy { pool: staff, phase: 0 })
            .spawn(Greedy { pool: staff, phase: 0 })
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let elapsed: Vec<f64> = sim.metrics().elapsed().collect();
        assert_eq!(elapsed, vec![1.0, 2.0]);
        assert_eq!(sim.pools().get(staff).unwrap().in_use(), 0);
    }

    #[test]
    fn same_seed_same_samples() {
        let mut a = cinema_sim(2, 1, 60.0, 30);
        let mut b = cinema_sim(2, 1, 60.0, 30);
        let ra = a.run(&mut NoopObserver).unwrap();
        let rb = b.run(&mut NoopObserver).unwrap();
        assert_eq!(ra, rb);
        assert!(!a.samples().is_empty());
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn observer_sees_every_event_spawn_and_sample() {
        let mut sim = periodic_arrivals(10.0);
        let mut recorder = Recorder::default();
        let report = sim.run(&mut recorder).unwrap();

        assert_eq!(recorder.events.len() as u64, report.events);
        assert_eq!(recorder.spawns, vec!["instant"; 4]);
        assert_eq!(recorder.samples, sim.samples());
        assert_eq!(recorder.end, Some(report));

        let dues: Vec<SimTime> = recorder.events.iter().map(|e| e.due).collect();
        assert!(dues.windows(2).all(|w| w[0] <= w[1]));
    }
}

// ── Fatal errors ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn release_without_acquire_aborts_with_time() {
        let mut pools = ResourcePools::new();
        let staff = pools.add("staff", 1).unwrap();
        let mut sim = SimBuilder::new(config(10.0, 1))
            .pools(pools)
            .spawn(BadRelease { pool: staff, waited: false })
            .build()
            .unwrap();

        let err = sim.run(&mut NoopObserver).unwrap_err();
        match &err {
            SimError::Process { at, source } => {
                assert_eq!(*at, t(1.5));
                assert!(matches!(
                    source,
                    ProcessError::Pool(PoolError::ReleaseWithoutAcquire { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("t=1.5"));
    }

    #[test]
    fn negative_wait_aborts() {
        let broken = Pipeline::builder("broken")
            .delay("rewind", |_: &mut SimRng| -1.0)
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config(10.0, 1))
            .spawn(broken.instantiate())
            .build()
            .unwrap();

        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            SimError::Process {
                source: ProcessError::Schedule(ScheduleError::InvalidDuration { .. }),
                ..
            }
        ));
        assert!(sim.samples().is_empty());
    }

    #[test]
    fn unbounded_uniform_aborts() {
        let broken = Pipeline::builder("broken")
            .delay("forever", Dist::uniform(0.0, f64::INFINITY))
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config(10.0, 1))
            .spawn(broken.instantiate())
            .build()
            .unwrap();

        match sim.run(&mut NoopObserver).unwrap_err() {
            SimError::Process {
                at,
                source: ProcessError::Schedule(ScheduleError::InvalidDuration { .. }),
            } => assert_eq!(at, SimTime::ZERO),
            other => panic!("unexpected error: {other}"),
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod logging_tests {
    use tracing_test::traced_test;

    use super::*;

    #[traced_test]
    #[test]
    fn run_logs_start_spawns_and_stop() {
        let mut sim = periodic_arrivals(4.0);
        sim.run(&mut NoopObserver).unwrap();
        assert!(logs_contain("simulation started"));
        assert!(logs_contain("spawned"));
        assert!(logs_contain("simulation stopped"));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn no_process_is_lost(
            staff    in 1usize..4,
            counters in 1usize..3,
            horizon  in 1.0f64..40.0,
            seed     in any::<u64>(),
        ) {
            let mut sim = cinema_sim(staff, counters, horizon, seed);
            let report = sim.run(&mut NoopObserver).unwrap();

            prop_assert_eq!(report.spawned, report.completed + report.suspended);
            prop_assert_eq!(sim.samples().len(), report.completed);
            prop_assert!(report.final_time.as_f64() <= horizon);
            for (_, pool) in sim.pools().iter() {
                prop_assert!(pool.in_use() <= pool.capacity());
            }
            for sample in sim.samples() {
                prop_assert!(sample.elapsed >= 0.0);
                prop_assert!(sample.completed_at.as_f64() <= horizon);
            }
        }
    }
}
