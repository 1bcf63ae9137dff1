//! Run configuration.

use crate::{ConfigError, ConfigResult, Delay, JobId, MachineId, Tick};

/// One job to be released onto the line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobSpec {
    pub id: JobId,

    /// Processing time on each machine, in visitation order.  Must have exactly
    /// `machine_count` non-negative entries.
    pub processing_times: Vec<Delay>,
}

impl JobSpec {
    pub fn new(id: u32, processing_times: &[Delay]) -> Self {
        Self {
            id:               JobId(id),
            processing_times: processing_times.to_vec(),
        }
    }
}

/// Top-level simulation configuration.
///
/// Typically built by the application crate and handed to
/// `flow_shop::run_simulation`, which validates it before anything runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Total logical run length.  Events due after this tick never fire.
    pub horizon: Delay,

    /// Number of machines in the line.  Machines are visited in order.
    pub machine_count: usize,

    /// Fixed spacing between consecutive job releases.  `0` releases every job
    /// at the same instant.
    pub arrival_interval: Delay,

    /// Jobs in release order.
    pub jobs: Vec<JobSpec>,
}

impl RunConfig {
    /// The last tick at which events still fire.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon)
    }

    /// Check every constraint and return the first violation found.
    ///
    /// Run-level fields are checked before any job, jobs in list order, and
    /// within a job the length before the individual entries.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.horizon <= 0 {
            return Err(ConfigError::NonPositiveHorizon(self.horizon));
        }
        if self.machine_count == 0 {
            return Err(ConfigError::NoMachines);
        }
        if self.arrival_interval < 0 {
            return Err(ConfigError::NegativeArrivalInterval(self.arrival_interval));
        }

        for job in &self.jobs {
            if job.processing_times.len() != self.machine_count {
                return Err(ConfigError::ProcessingTimesLength {
                    job:      job.id,
                    expected: self.machine_count,
                    got:      job.processing_times.len(),
                });
            }
            if let Some((i, &value)) = job
                .processing_times
                .iter()
                .enumerate()
                .find(|&(_, &t)| t < 0)
            {
                return Err(ConfigError::NegativeProcessingTime {
                    job:     job.id,
                    machine: MachineId(i as u32),
                    value,
                });
            }
        }
        Ok(())
    }
}
