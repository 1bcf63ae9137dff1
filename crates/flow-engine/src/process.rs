//! The `Process` trait — a suspendable unit of simulation logic.
//!
//! A process is an explicit state machine.  Each call to
//! [`Process::resume`] runs it from its last suspension point to the next
//! one, and the returned [`Yield`] tells the engine what it is waiting for.
//!
//! # Suspension points
//!
//! ```text
//! Yield::Timeout(d)   → resume again at now + d (d ≥ 0)
//! Yield::Acquire(r)   → resume once r is held; same step if r is free
//! Yield::Finish       → never resume; the process is dropped
//! ```
//!
//! Releasing a resource is not a suspension point: [`Context::release`]
//! returns straight away and the process keeps running.

use flow_core::{Delay, ProcessId, ResourceId, Tick};
use log::trace;

use crate::engine::Kernel;
use crate::{EngineObserver, EngineResult};

/// What a process waits for after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yield {
    /// Sleep for the given number of ticks.
    Timeout(Delay),
    /// Wait until the resource is granted.
    Acquire(ResourceId),
    /// The process is done.
    Finish,
}

/// Pluggable process logic.
///
/// `W` is the run context shared by every process in one engine (for the
/// flow shop: machines plus the statistics log).  Processes reach it through
/// [`Context::world`].
///
/// # Example
///
/// ```rust,ignore
/// struct Ticker { left: u32 }
///
/// impl Process<()> for Ticker {
///     fn resume(&mut self, _ctx: &mut Context<'_, ()>) -> EngineResult<Yield> {
///         if self.left == 0 {
///             return Ok(Yield::Finish);
///         }
///         self.left -= 1;
///         Ok(Yield::Timeout(1))
///     }
/// }
/// ```
pub trait Process<W> {
    /// Run until the next suspension point.
    ///
    /// An `Err` aborts the whole run; the engine tags it with this process's
    /// id, label and the current tick.
    fn resume(&mut self, ctx: &mut Context<'_, W>) -> EngineResult<Yield>;

    /// Human-readable name used in logs and error reports.
    fn label(&self) -> String {
        "process".to_owned()
    }
}

// ── Closure processes ─────────────────────────────────────────────────────────

/// A [`Process`] backed by a closure.  Build with [`from_fn`].
pub struct FnProcess<F> {
    label: String,
    f:     F,
}

/// Wrap a closure as a process.  Handy for tests and one-off drivers.
pub fn from_fn<W, F>(label: impl Into<String>, f: F) -> FnProcess<F>
where
    F: FnMut(&mut Context<'_, W>) -> EngineResult<Yield>,
{
    FnProcess { label: label.into(), f }
}

impl<W, F> Process<W> for FnProcess<F>
where
    F: FnMut(&mut Context<'_, W>) -> EngineResult<Yield>,
{
    fn resume(&mut self, ctx: &mut Context<'_, W>) -> EngineResult<Yield> {
        (self.f)(ctx)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

/// The engine as seen from inside one process step.
///
/// Borrows the engine mutably for the duration of a single `resume` call.
pub struct Context<'a, W> {
    pub(crate) id:       ProcessId,
    pub(crate) kernel:   &'a mut Kernel<W>,
    pub(crate) world:    &'a mut W,
    pub(crate) observer: &'a mut dyn EngineObserver,
}

impl<W: 'static> Context<'_, W> {
    /// Current logical time.
    #[inline]
    pub fn now(&self) -> Tick {
        self.kernel.clock.now()
    }

    /// ID of the process being resumed.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Mutable access to the run context.
    #[inline]
    pub fn world(&mut self) -> &mut W {
        &mut *self.world
    }

    /// Register a new process whose first step runs at the current tick,
    /// after every continuation already due now.
    pub fn spawn(&mut self, process: Box<dyn Process<W>>) -> ProcessId {
        let now = self.now();
        self.kernel.spawn_at(now, process)
    }

    /// Register a new process whose first step runs `delay` ticks from now.
    pub fn schedule(&mut self, delay: Delay, process: Box<dyn Process<W>>) -> EngineResult<ProcessId> {
        self.kernel.schedule(delay, process)
    }

    /// Release `resource`, which this process must hold.
    ///
    /// If anyone is waiting, the front waiter becomes the holder immediately
    /// and is queued to resume at the current tick.
    pub fn release(&mut self, resource: ResourceId) -> EngineResult<()> {
        let now = self.now();
        let next = self.kernel.resource_mut(resource)?.release(self.id, now)?;
        self.observer.on_release(now, resource, self.id);
        trace!("{now}: {} released {resource}", self.id);

        if let Some(next) = next {
            self.observer.on_grant(now, resource, next);
            trace!("{now}: {resource} handed to waiting {next}");
            self.kernel.queue.push(now, next);
        }
        Ok(())
    }
}
