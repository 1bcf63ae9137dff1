//! Jobs and the job routine that walks one job down the line.
//!
//! # Job routine
//!
//! ```text
//! start = now
//! for each machine i, in order:
//!   wait_start = now
//!   acquire machine i          ← suspends only if the machine is busy
//!   waiting[i] = now - wait_start
//!   hold for processing[i]     ← suspends, even for 0
//!   release machine i          ← hands it to the next waiter, no suspension
//! record (start, now, waiting) in the statistics log
//! ```
//!
//! A job cut off by the horizon never reaches the last line and leaves no
//! record.

use flow_core::{Delay, JobId, JobSpec, Tick};
use flow_engine::{Context, EngineResult, Process, Yield};
use log::info;

use crate::{CompletedJob, ShopState};

/// A job in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id:               JobId,
    /// One entry per machine, all non-negative.
    pub processing_times: Vec<Delay>,
    /// Filled in one entry per machine as the job is granted each one.
    pub waiting_times:    Vec<Delay>,
}

impl From<JobSpec> for Job {
    fn from(spec: JobSpec) -> Self {
        let waiting_times = Vec::with_capacity(spec.processing_times.len());
        Self {
            id: spec.id,
            processing_times: spec.processing_times,
            waiting_times,
        }
    }
}

// ── JobProcess ────────────────────────────────────────────────────────────────

/// Where the routine resumes next.
#[derive(Debug, Clone, Copy)]
enum Stage {
    /// Not started.
    Arrive,
    /// About to request `machine` (or finish, past the last one).
    Request { machine: usize, start: Tick },
    /// Waiting for `machine` to be granted.
    Granted { machine: usize, start: Tick, wait_start: Tick },
    /// Processing on `machine` is over.
    Processed { machine: usize, start: Tick },
}

/// The process driving one [`Job`] through every machine.
///
/// Built only by the generator, from a validated configuration, so
/// `processing_times` always has one entry per machine.
pub(crate) struct JobProcess {
    job:   Job,
    stage: Stage,
}

impl JobProcess {
    pub(crate) fn new(job: Job) -> Self {
        Self {
            job,
            stage: Stage::Arrive,
        }
    }

    fn complete(&mut self, start: Tick, end: Tick) -> CompletedJob {
        CompletedJob {
            id:               self.job.id,
            processing_times: std::mem::take(&mut self.job.processing_times),
            start_time:       start,
            end_time:         end,
            waiting_times:    std::mem::take(&mut self.job.waiting_times),
        }
    }
}

impl Process<ShopState> for JobProcess {
    fn resume(&mut self, ctx: &mut Context<'_, ShopState>) -> EngineResult<Yield> {
        loop {
            let now = ctx.now();
            match self.stage {
                Stage::Arrive => {
                    info!("[{now}] {} started", self.job.id);
                    self.stage = Stage::Request { machine: 0, start: now };
                }

                Stage::Request { machine, start } => {
                    let Some(resource) = ctx.world().machines.get(machine).map(|m| m.resource) else {
                        let done = self.complete(start, now);
                        info!("[{now}] {} completed (cycle time {})", done.id, done.cycle_time());
                        ctx.world().stats.record(done);
                        return Ok(Yield::Finish);
                    };
                    self.stage = Stage::Granted { machine, start, wait_start: now };
                    return Ok(Yield::Acquire(resource));
                }

                Stage::Granted { machine, start, wait_start } => {
                    let wait = now - wait_start;
                    self.job.waiting_times.push(wait);
                    let duration = self.job.processing_times[machine];
                    info!(
                        "[{now}] {} started on {} (waited {wait})",
                        self.job.id,
                        ctx.world().machines[machine].name
                    );
                    self.stage = Stage::Processed { machine, start };
                    return Ok(Yield::Timeout(duration));
                }

                Stage::Processed { machine, start } => {
                    let resource = ctx.world().machines[machine].resource;
                    ctx.release(resource)?;
                    info!(
                        "[{now}] {} finished on {} (processed {})",
                        self.job.id,
                        ctx.world().machines[machine].name,
                        self.job.processing_times[machine]
                    );
                    self.stage = Stage::Request { machine: machine + 1, start };
                }
            }
        }
    }

    fn label(&self) -> String {
        format!("job {}", self.job.id.0)
    }
}
