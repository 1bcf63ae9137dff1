//! line — three-machine flow line with five jobs.
//!
//! Runs the reference configuration once with a grant-counting observer,
//! prints the per-job statistics, then sweeps the arrival interval to show
//! how contention grows as jobs are released closer together.
//!
//! Set `RUST_LOG=debug` to follow every clock advance and process step.

use std::time::Instant;

use anyhow::Result;
use log::LevelFilter;

use flow_core::{JobSpec, ProcessId, ResourceId, RunConfig, Tick};
use flow_engine::EngineObserver;
use flow_shop::{FlowShopBuilder, run_many};

// ── Constants ─────────────────────────────────────────────────────────────────

const HORIZON:          i64   = 100;
const MACHINE_COUNT:    usize = 3;
const ARRIVAL_INTERVAL: i64   = 5;

/// `(job id, processing time per machine)` in release order.
const JOBS: [(u32, [i64; MACHINE_COUNT]); 5] = [
    (1, [3, 2, 4]),
    (2, [2, 3, 3]),
    (3, [4, 2, 5]),
    (4, [3, 3, 2]),
    (5, [2, 4, 3]),
];

fn config(arrival_interval: i64) -> RunConfig {
    RunConfig {
        horizon: HORIZON,
        machine_count: MACHINE_COUNT,
        arrival_interval,
        jobs: JOBS.iter().map(|(id, t)| JobSpec::new(*id, t)).collect(),
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts machine grants per machine and remembers where the clock stopped.
struct GrantCounter {
    grants:     Vec<usize>,
    final_tick: Tick,
    discarded:  usize,
}

impl GrantCounter {
    fn new(machines: usize) -> Self {
        Self { grants: vec![0; machines], final_tick: Tick::ZERO, discarded: 0 }
    }
}

impl EngineObserver for GrantCounter {
    fn on_grant(&mut self, _tick: Tick, resource: ResourceId, _process: ProcessId) {
        if let Some(n) = self.grants.get_mut(resource.index()) {
            *n += 1;
        }
    }

    fn on_run_end(&mut self, tick: Tick, discarded: usize) {
        self.final_tick = tick;
        self.discarded = discarded;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    println!("=== line — flow-shop simulation ===");
    println!(
        "Machines: {MACHINE_COUNT}  |  Jobs: {}  |  Interval: {ARRIVAL_INTERVAL}  |  Horizon: {HORIZON}",
        JOBS.len()
    );
    println!();

    // 1. Build and run the reference line.
    let shop = FlowShopBuilder::new(config(ARRIVAL_INTERVAL)).build()?;
    let names: Vec<String> = shop.machines().iter().map(|m| m.name.clone()).collect();
    let mut obs = GrantCounter::new(names.len());

    let t0 = Instant::now();
    let stats = shop.run(&mut obs)?;
    let elapsed = t0.elapsed();

    println!(
        "Simulation complete in {:.3} ms at {} ({} pending events discarded)",
        elapsed.as_secs_f64() * 1e3,
        obs.final_tick,
        obs.discarded
    );
    println!();

    // 2. Per-job table.
    println!(
        "{:<6} {:>6} {:>6} {:>6}  {:<12} {:<12}",
        "Job", "Start", "End", "Cycle", "Processing", "Waiting"
    );
    println!("{}", "-".repeat(54));
    for job in &stats {
        println!(
            "{:<6} {:>6} {:>6} {:>6}  {:<12} {:<12}",
            job.id.0,
            job.start_time.0,
            job.end_time.0,
            job.cycle_time(),
            format!("{:?}", job.processing_times),
            format!("{:?}", job.waiting_times),
        );
    }
    println!();

    // 3. Per-machine summary.
    println!("{:<12} {:>7} {:>13}", "Machine", "Grants", "Total wait");
    println!("{}", "-".repeat(34));
    for ((name, grants), wait) in names
        .iter()
        .zip(&obs.grants)
        .zip(stats.total_waiting_by_machine())
    {
        println!("{name:<12} {grants:>7} {wait:>13}");
    }
    println!();

    match stats.mean_cycle_time() {
        Some(mean) => println!("Mean cycle time: {mean:.2}"),
        None => println!("No job completed before the horizon"),
    }
    println!();

    // 4. Arrival-interval sweep.
    let intervals: Vec<i64> = (0..=ARRIVAL_INTERVAL).collect();
    let configs: Vec<RunConfig> = intervals.iter().map(|i| config(*i)).collect();
    println!("{:<10} {:>10} {:>12}", "Interval", "Completed", "Mean cycle");
    println!("{}", "-".repeat(34));
    for (interval, result) in intervals.iter().zip(run_many(&configs)) {
        let stats = result?;
        let mean = stats
            .mean_cycle_time()
            .map_or_else(|| "-".to_owned(), |m| format!("{m:.2}"));
        println!("{interval:<10} {:>10} {mean:>12}", stats.len());
    }

    Ok(())
}
