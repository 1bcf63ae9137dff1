//! Engine observer trait for progress reporting and ordering checks.

use flow_core::{ProcessId, ResourceId, Tick};

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] as it processes
/// events.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — grant counter
///
/// ```rust,ignore
/// struct GrantCounter(usize);
///
/// impl EngineObserver for GrantCounter {
///     fn on_grant(&mut self, _tick: Tick, _resource: ResourceId, _process: ProcessId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait EngineObserver {
    /// The clock moved forward from `from` to `to`.
    fn on_advance(&mut self, _from: Tick, _to: Tick) {}

    /// `process` is about to run a step at `tick`.
    fn on_resume(&mut self, _tick: Tick, _process: ProcessId) {}

    /// `process` became the holder of `resource` at `tick`.
    fn on_grant(&mut self, _tick: Tick, _resource: ResourceId, _process: ProcessId) {}

    /// `process` gave up `resource` at `tick`.
    fn on_release(&mut self, _tick: Tick, _resource: ResourceId, _process: ProcessId) {}

    /// Called once when `run` returns successfully.  `discarded` counts the
    /// events that were due after the horizon and never fired.
    fn on_run_end(&mut self, _tick: Tick, _discarded: usize) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}

// ── EventTrace ────────────────────────────────────────────────────────────────

/// One observer callback, as recorded by [`EventTrace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceEvent {
    Advance { from: Tick, to: Tick },
    Resume { tick: Tick, process: ProcessId },
    Grant { tick: Tick, resource: ResourceId, process: ProcessId },
    Release { tick: Tick, resource: ResourceId, process: ProcessId },
    RunEnd { tick: Tick, discarded: usize },
}

/// Records every callback in order.
///
/// Two runs of the same configuration must produce equal traces.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventTrace {
    pub events: Vec<TraceEvent>,
}

impl EventTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes granted `resource`, in grant order.
    pub fn grants(&self, resource: ResourceId) -> Vec<ProcessId> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                TraceEvent::Grant { resource: r, process, .. } if r == resource => Some(process),
                _ => None,
            })
            .collect()
    }

    /// Ticks at which the clock moved, in order.
    pub fn advances(&self) -> Vec<Tick> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                TraceEvent::Advance { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }
}

impl EngineObserver for EventTrace {
    fn on_advance(&mut self, from: Tick, to: Tick) {
        self.events.push(TraceEvent::Advance { from, to });
    }

    fn on_resume(&mut self, tick: Tick, process: ProcessId) {
        self.events.push(TraceEvent::Resume { tick, process });
    }

    fn on_grant(&mut self, tick: Tick, resource: ResourceId, process: ProcessId) {
        self.events.push(TraceEvent::Grant { tick, resource, process });
    }

    fn on_release(&mut self, tick: Tick, resource: ResourceId, process: ProcessId) {
        self.events.push(TraceEvent::Release { tick, resource, process });
    }

    fn on_run_end(&mut self, tick: Tick, discarded: usize) {
        self.events.push(TraceEvent::RunEnd { tick, discarded });
    }
}
