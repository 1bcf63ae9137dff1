//! Job arrival routine.

use flow_core::{Delay, JobSpec};
use flow_engine::{Context, EngineResult, Process, Yield};
use log::debug;

use crate::ShopState;
use crate::job::{Job, JobProcess};

/// Releases jobs onto the line at a fixed cadence.
///
/// Each step spawns the next job (its first step runs at this same tick) and
/// then sleeps for `arrival_interval`.  Jobs still pending when the horizon
/// is reached are never created.
pub(crate) struct Generator {
    pending:          std::vec::IntoIter<JobSpec>,
    arrival_interval: Delay,
}

impl Generator {
    pub(crate) fn new(jobs: Vec<JobSpec>, arrival_interval: Delay) -> Self {
        Self {
            pending: jobs.into_iter(),
            arrival_interval,
        }
    }
}

impl Process<ShopState> for Generator {
    fn resume(&mut self, ctx: &mut Context<'_, ShopState>) -> EngineResult<Yield> {
        let Some(spec) = self.pending.next() else {
            return Ok(Yield::Finish);
        };

        let id = spec.id;
        let process = ctx.spawn(Box::new(JobProcess::new(Job::from(spec))));
        debug!("[{}] released {id} as {process}", ctx.now());
        Ok(Yield::Timeout(self.arrival_interval))
    }

    fn label(&self) -> String {
        "generator".to_owned()
    }
}
