//! Error types for flow-engine.
//!
//! Every variant is a programming error in a process or in the caller, not a
//! transient condition.  `Engine::run` stops at the first one and returns it.

use flow_core::{Delay, ProcessId, ResourceId, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// `process` is `None` when the delayed process had not been registered
    /// yet (a negative `schedule` delay).
    #[error("{label} asked for negative delay {delay} at {tick}")]
    InvalidDelay {
        process: Option<ProcessId>,
        label:   String,
        delay:   Delay,
        tick:    Tick,
    },

    #[error("{requester} released {name} ({resource}) at {tick} but the holder is {holder:?}")]
    NotHolder {
        resource:  ResourceId,
        name:      String,
        requester: ProcessId,
        holder:    Option<ProcessId>,
        tick:      Tick,
    },

    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),

    #[error("event fired for {0}, which has no live continuation")]
    UnknownProcess(ProcessId),

    /// A failure raised from inside a process step, tagged with the process
    /// that raised it.
    #[error("{label} ({process}) failed at {tick}: {source}")]
    Process {
        process: ProcessId,
        label:   String,
        tick:    Tick,
        #[source]
        source:  Box<EngineError>,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
