//! Unit tests for flow-shop.

use flow_core::{ConfigError, Delay, JobId, JobSpec, ProcessId, ResourceId, RunConfig, Tick};
use flow_engine::{EventTrace, NoopObserver, TraceEvent};

use crate::{FlowShopBuilder, ShopError, StatisticsLog, run_many, run_simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn job(id: u32, processing_times: &[Delay]) -> JobSpec {
    JobSpec::new(id, processing_times)
}

/// Machine count is taken from the first job.
fn config(horizon: Delay, interval: Delay, jobs: Vec<JobSpec>) -> RunConfig {
    let machine_count = jobs.first().map_or(3, |j| j.processing_times.len());
    RunConfig {
        horizon,
        machine_count,
        arrival_interval: interval,
        jobs,
    }
}

/// Two jobs arriving five ticks apart; they never contend.
fn staggered() -> RunConfig {
    config(100, 5, vec![job(1, &[3, 2, 4]), job(2, &[2, 3, 3])])
}

/// Two identical jobs arriving together.
fn simultaneous() -> RunConfig {
    config(100, 0, vec![job(1, &[5, 5, 5]), job(2, &[5, 5, 5])])
}

/// The five-job, three-machine line used by the demo.
fn five_jobs() -> RunConfig {
    config(
        100,
        5,
        vec![
            job(1, &[3, 2, 4]),
            job(2, &[2, 3, 3]),
            job(3, &[4, 2, 5]),
            job(4, &[3, 3, 2]),
            job(5, &[2, 4, 3]),
        ],
    )
}

fn run(config: RunConfig) -> StatisticsLog {
    run_simulation(&config).unwrap()
}

fn run_traced(config: RunConfig) -> (StatisticsLog, EventTrace) {
    let mut trace = EventTrace::new();
    let stats = FlowShopBuilder::new(config).build().unwrap().run(&mut trace).unwrap();
    (stats, trace)
}

fn ids(stats: &StatisticsLog) -> Vec<u32> {
    stats.iter().map(|j| j.id.0).collect()
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn staggered_jobs_never_wait() {
        let stats = run(staggered());
        assert_eq!(ids(&stats), vec![1, 2]);

        let j1 = &stats.jobs()[0];
        assert_eq!(j1.start_time, Tick(0));
        assert_eq!(j1.end_time, Tick(9));
        assert_eq!(j1.waiting_times, vec![0, 0, 0]);
        assert_eq!(j1.cycle_time(), 9);

        let j2 = &stats.jobs()[1];
        assert_eq!(j2.start_time, Tick(5));
        assert_eq!(j2.end_time, Tick(13));
        assert_eq!(j2.waiting_times, vec![0, 0, 0]);
        assert_eq!(j2.cycle_time(), 8);

        assert_eq!(stats.cycle_times(), &[9, 8]);
    }

    #[test]
    fn simultaneous_arrivals_queue_in_release_order() {
        let stats = run(simultaneous());
        assert_eq!(ids(&stats), vec![1, 2]);

        let j1 = &stats.jobs()[0];
        assert_eq!(j1.waiting_times, vec![0, 0, 0]);
        assert_eq!(j1.end_time, Tick(15));

        let j2 = &stats.jobs()[1];
        assert_eq!(j2.start_time, Tick(0));
        assert_eq!(j2.waiting_times, vec![5, 0, 0]);
        assert_eq!(j2.end_time, Tick(20));
        assert_eq!(j2.cycle_time(), 20);
    }

    #[test]
    fn long_middle_stage_cascades_waiting() {
        let stats = run(config(100, 0, vec![job(1, &[1, 5, 1]), job(2, &[1, 1, 1])]));

        let j1 = stats.get(JobId(1)).unwrap();
        assert_eq!(j1.cycle_time(), 7);

        let j2 = stats.get(JobId(2)).unwrap();
        assert_eq!(j2.waiting_times, vec![1, 4, 0]);
        assert_eq!(j2.end_time, Tick(8));
        assert_eq!(j2.cycle_time(), 8);
    }

    #[test]
    fn zero_duration_stage_still_yields_to_the_queue() {
        let stats = run(config(100, 0, vec![job(1, &[1, 1]), job(2, &[0, 1]), job(3, &[1, 1])]));
        assert_eq!(ids(&stats), vec![1, 2, 3]);

        assert_eq!(stats.jobs()[0].end_time, Tick(2));

        let j2 = &stats.jobs()[1];
        assert_eq!(j2.waiting_times, vec![1, 1]);
        assert_eq!(j2.cycle_time(), 3);

        let j3 = &stats.jobs()[2];
        assert_eq!(j3.waiting_times, vec![1, 1]);
        assert_eq!(j3.cycle_time(), 4);
    }

    #[test]
    fn five_job_line() {
        let stats = run(five_jobs());
        assert_eq!(ids(&stats), vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.cycle_times(), &[9, 8, 11, 8, 9]);

        let ends: Vec<i64> = stats.iter().map(|j| j.end_time.0).collect();
        assert_eq!(ends, vec![9, 13, 21, 23, 29]);
        assert!(stats.iter().all(|j| j.total_waiting() == 0));
        assert_eq!(stats.mean_cycle_time(), Some(9.0));
    }

    #[test]
    fn single_machine_line() {
        let stats = run(config(100, 1, vec![job(1, &[4]), job(2, &[4]), job(3, &[4])]));
        let waits: Vec<Delay> = stats.iter().map(|j| j.waiting_times[0]).collect();
        assert_eq!(waits, vec![0, 3, 6]);
    }
}

// ── Horizon ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod horizon {
    use super::*;

    #[test]
    fn job_finishing_exactly_at_horizon_is_recorded() {
        let mut cfg = staggered();
        cfg.horizon = 9;
        let stats = run(cfg);

        assert_eq!(ids(&stats), vec![1]);
        assert_eq!(stats.jobs()[0].end_time, Tick(9));
    }

    #[test]
    fn unfinished_jobs_leave_no_record() {
        let mut cfg = staggered();
        cfg.horizon = 6;
        assert!(run(cfg).is_empty());
    }

    #[test]
    fn jobs_due_after_horizon_are_never_created() {
        let mut trace = EventTrace::new();
        let cfg = config(10, 50, vec![job(1, &[1, 1]), job(2, &[1, 1]), job(3, &[1, 1])]);
        let stats = FlowShopBuilder::new(cfg).build().unwrap().run(&mut trace).unwrap();

        assert_eq!(ids(&stats), vec![1]);
        // Generator (0) and job 1 (1) only.
        assert!(trace.events.iter().all(|e| match *e {
            TraceEvent::Resume { process, .. } => process.0 <= 1,
            _ => true,
        }));
        assert_eq!(
            trace.events.last(),
            Some(&TraceEvent::RunEnd { tick: Tick(10), discarded: 1 })
        );
    }

    #[test]
    fn empty_job_list_completes_nothing() {
        let cfg = RunConfig {
            horizon:          10,
            machine_count:    2,
            arrival_interval: 1,
            jobs:             vec![],
        };
        let stats = run(cfg);
        assert!(stats.is_empty());
        assert_eq!(stats.machine_count(), 2);
        assert_eq!(stats.mean_cycle_time(), None);
    }
}

// ── Randomized invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_config(rng: &mut SmallRng) -> RunConfig {
        let machine_count: usize = rng.gen_range(1..=4);
        let job_count = rng.gen_range(1..=8u32);
        RunConfig {
            horizon: 10_000,
            machine_count,
            arrival_interval: rng.gen_range(0..=4),
            jobs: (1..=job_count)
                .map(|id| {
                    let times: Vec<Delay> = (0..machine_count).map(|_| rng.gen_range(0..=6)).collect();
                    JobSpec::new(id, &times)
                })
                .collect(),
        }
    }

    #[test]
    fn cycle_time_is_processing_plus_waiting() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let cfg = random_config(&mut rng);
            let stats = run(cfg.clone());
            assert_eq!(stats.len(), cfg.jobs.len());

            for job in &stats {
                assert_eq!(job.waiting_times.len(), cfg.machine_count);
                assert!(job.waiting_times.iter().all(|w| *w >= 0));
                assert_eq!(job.cycle_time(), job.total_processing() + job.total_waiting());
                assert_eq!(job.start_time, Tick((job.id.0 as i64 - 1) * cfg.arrival_interval));
            }
        }
    }

    #[test]
    fn every_machine_serves_jobs_in_arrival_order() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let cfg = random_config(&mut rng);
            let (_, trace) = run_traced(cfg.clone());

            // Generator is process 0; job k is process k.
            let expected: Vec<ProcessId> = (1..=cfg.jobs.len() as u32).map(ProcessId).collect();
            for m in 0..cfg.machine_count {
                assert_eq!(trace.grants(ResourceId(m as u32)), expected);
            }
        }
    }

    #[test]
    fn machines_never_have_two_holders() {
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..200 {
            let cfg = random_config(&mut rng);
            let (_, trace) = run_traced(cfg.clone());

            let mut holders: Vec<Option<ProcessId>> = vec![None; cfg.machine_count];
            for event in &trace.events {
                match *event {
                    TraceEvent::Grant { resource, process, .. } => {
                        let slot = &mut holders[resource.index()];
                        assert_eq!(*slot, None, "{resource} granted to {process} while held");
                        *slot = Some(process);
                    }
                    TraceEvent::Release { resource, process, .. } => {
                        let slot = &mut holders[resource.index()];
                        assert_eq!(*slot, Some(process));
                        *slot = None;
                    }
                    _ => {}
                }
            }
            assert!(holders.iter().all(Option::is_none));
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..50 {
            let cfg = random_config(&mut rng);
            let (a_stats, a_trace) = run_traced(cfg.clone());
            let (b_stats, b_trace) = run_traced(cfg);
            assert_eq!(a_stats, b_stats);
            assert_eq!(a_trace, b_trace);
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn default_machine_names() {
        let shop = FlowShopBuilder::new(staggered()).build().unwrap();
        let names: Vec<&str> = shop.machines().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Machine_1", "Machine_2", "Machine_3"]);
        assert_eq!(shop.horizon(), Tick(100));
        assert_eq!(shop.engine().resources().len(), 3);
    }

    #[test]
    fn custom_machine_names_reach_resources() {
        let shop = FlowShopBuilder::new(staggered())
            .machine_names(vec!["cut".into(), "weld".into(), "paint".into()])
            .build()
            .unwrap();
        let m = &shop.machines()[1];
        assert_eq!(m.name, "weld");
        assert_eq!(shop.engine().resource(m.resource).map(|r| r.name()), Some("weld"));
    }

    #[test]
    fn wrong_name_count_rejected() {
        let err = FlowShopBuilder::new(staggered())
            .machine_names(vec!["only".into()])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ShopError::MachineNameMismatch { expected: 3, got: 1 }));
    }

    #[test]
    fn invalid_config_never_runs() {
        let mut cfg = staggered();
        cfg.jobs[1].processing_times.pop();
        let err = run_simulation(&cfg).unwrap_err();
        assert!(matches!(
            err,
            ShopError::Config(ConfigError::ProcessingTimesLength { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn zero_horizon_rejected() {
        let mut cfg = staggered();
        cfg.horizon = 0;
        assert!(matches!(
            run_simulation(&cfg),
            Err(ShopError::Config(ConfigError::NonPositiveHorizon(0)))
        ));
    }

    #[test]
    fn noop_observer_matches_traced_run() {
        let quiet = FlowShopBuilder::new(five_jobs()).build().unwrap().run(&mut NoopObserver).unwrap();
        let (traced, _) = run_traced(five_jobs());
        assert_eq!(quiet, traced);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod statistics {
    use super::*;

    #[test]
    fn waiting_totals_per_machine() {
        let stats = run(simultaneous());
        assert_eq!(stats.total_waiting_by_machine(), vec![5, 0, 0]);
    }

    #[test]
    fn lookup_by_job_id() {
        let stats = run(five_jobs());
        assert_eq!(stats.get(JobId(3)).map(|j| j.cycle_time()), Some(11));
        assert!(stats.get(JobId(9)).is_none());
    }

    #[test]
    fn duplicate_job_ids_are_kept() {
        let stats = run(config(100, 0, vec![job(7, &[1]), job(7, &[1])]));
        assert_eq!(ids(&stats), vec![7, 7]);
        assert_eq!(stats.get(JobId(7)).map(|j| j.end_time), Some(Tick(1)));
    }
}

// ── run_many ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod many {
    use super::*;

    #[test]
    fn results_match_individual_runs_in_order() {
        let mut bad = staggered();
        bad.machine_count = 0;
        let configs = vec![staggered(), simultaneous(), bad, five_jobs()];

        let results = run_many(&configs);
        assert_eq!(results.len(), 4);

        assert_eq!(results[0].as_ref().unwrap(), &run(staggered()));
        assert_eq!(results[1].as_ref().unwrap(), &run(simultaneous()));
        assert!(matches!(results[2], Err(ShopError::Config(ConfigError::NoMachines))));
        assert_eq!(results[3].as_ref().unwrap().cycle_times(), &[9, 8, 11, 8, 9]);
    }
}
