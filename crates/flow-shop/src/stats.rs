//! Completed-job records and the statistics log.

use flow_core::{Delay, JobId, Tick};

// ── CompletedJob ──────────────────────────────────────────────────────────────

/// A job that made it through every machine before the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedJob {
    pub id:               JobId,
    pub processing_times: Vec<Delay>,
    /// Tick of the job's first step (its arrival).
    pub start_time:       Tick,
    /// Tick at which it released the last machine.
    pub end_time:         Tick,
    /// Time spent queued for each machine, in visitation order.
    pub waiting_times:    Vec<Delay>,
}

impl CompletedJob {
    /// Elapsed time from start to completion.
    ///
    /// Always equals `total_processing() + total_waiting()`.
    #[inline]
    pub fn cycle_time(&self) -> Delay {
        self.end_time - self.start_time
    }

    pub fn total_processing(&self) -> Delay {
        self.processing_times.iter().sum()
    }

    pub fn total_waiting(&self) -> Delay {
        self.waiting_times.iter().sum()
    }
}

// ── StatisticsLog ─────────────────────────────────────────────────────────────

/// Append-only record of completed jobs, in completion order.
///
/// Written only by job processes while the engine runs; read by the caller
/// once `run` has returned.  `cycle_times[i]` is always
/// `jobs[i].cycle_time()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsLog {
    machine_count: usize,
    jobs:          Vec<CompletedJob>,
    cycle_times:   Vec<Delay>,
}

impl StatisticsLog {
    pub fn new(machine_count: usize) -> Self {
        Self {
            machine_count,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, job: CompletedJob) {
        debug_assert_eq!(job.waiting_times.len(), self.machine_count);
        debug_assert_eq!(job.processing_times.len(), self.machine_count);
        self.cycle_times.push(job.cycle_time());
        self.jobs.push(job);
    }

    pub fn machine_count(&self) -> usize {
        self.machine_count
    }

    pub fn jobs(&self) -> &[CompletedJob] {
        &self.jobs
    }

    pub fn cycle_times(&self) -> &[Delay] {
        &self.cycle_times
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompletedJob> {
        self.jobs.iter()
    }

    /// The first completed job with identity `id`.
    pub fn get(&self, id: JobId) -> Option<&CompletedJob> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Average cycle time over completed jobs, `None` if none completed.
    pub fn mean_cycle_time(&self) -> Option<f64> {
        if self.cycle_times.is_empty() {
            return None;
        }
        let total: Delay = self.cycle_times.iter().sum();
        Some(total as f64 / self.cycle_times.len() as f64)
    }

    /// Waiting time summed over completed jobs, one entry per machine.
    pub fn total_waiting_by_machine(&self) -> Vec<Delay> {
        let mut totals = vec![0; self.machine_count];
        for job in &self.jobs {
            for (total, wait) in totals.iter_mut().zip(&job.waiting_times) {
                *total += wait;
            }
        }
        totals
    }
}

impl<'a> IntoIterator for &'a StatisticsLog {
    type Item = &'a CompletedJob;
    type IntoIter = std::slice::Iter<'a, CompletedJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
