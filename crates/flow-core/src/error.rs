//! Configuration error type.
//!
//! Every variant describes input that is rejected before a run starts.  The
//! simulator never repairs a malformed configuration.

use thiserror::Error;

use crate::{Delay, JobId, MachineId};

/// A malformed [`RunConfig`][crate::RunConfig].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("horizon must be positive, got {0}")]
    NonPositiveHorizon(Delay),

    #[error("a line needs at least one machine")]
    NoMachines,

    #[error("arrival interval must not be negative, got {0}")]
    NegativeArrivalInterval(Delay),

    #[error("{job} has {got} processing times but the line has {expected} machines")]
    ProcessingTimesLength {
        job:      JobId,
        expected: usize,
        got:      usize,
    },

    #[error("{job} has negative processing time {value} on {machine}")]
    NegativeProcessingTime {
        job:     JobId,
        machine: MachineId,
        value:   Delay,
    },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
