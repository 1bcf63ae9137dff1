//! The `Engine` struct and its event loop.

use flow_core::{Delay, ProcessId, ResourceId, SimClock, Tick};
use log::{debug, trace, warn};

use crate::resource::{Acquired, Resource};
use crate::{Context, EngineError, EngineObserver, EngineResult, EventQueue, Process, Yield};

// ── Kernel ────────────────────────────────────────────────────────────────────

/// Scheduler state a running process may touch through its [`Context`].
///
/// Split from the run context `W` so a step can borrow both mutably.
pub(crate) struct Kernel<W> {
    pub(crate) clock:     SimClock,
    pub(crate) queue:     EventQueue<ProcessId>,
    /// Process table indexed by `ProcessId`.  A slot is `None` while its
    /// process is running a step and after it has finished.
    pub(crate) processes: Vec<Option<Box<dyn Process<W>>>>,
    pub(crate) resources: Vec<Resource>,
}

impl<W: 'static> Kernel<W> {
    fn new() -> Self {
        Self {
            clock:     SimClock::new(),
            queue:     EventQueue::new(),
            processes: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub(crate) fn spawn_at(&mut self, due: Tick, process: Box<dyn Process<W>>) -> ProcessId {
        let id = ProcessId(self.processes.len() as u32);
        trace!("{}: spawn {} ({id}) due {due}", self.clock.now(), process.label());
        self.processes.push(Some(process));
        self.queue.push(due, id);
        id
    }

    pub(crate) fn schedule(&mut self, delay: Delay, process: Box<dyn Process<W>>) -> EngineResult<ProcessId> {
        let now = self.clock.now();
        let due = now.checked_offset(delay).ok_or_else(|| EngineError::InvalidDelay {
            process: None,
            label:   process.label(),
            delay,
            tick:    now,
        })?;
        Ok(self.spawn_at(due, process))
    }

    pub(crate) fn resource_mut(&mut self, id: ResourceId) -> EngineResult<&mut Resource> {
        self.resources
            .get_mut(id.index())
            .ok_or(EngineError::UnknownResource(id))
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// A single-threaded discrete-event scheduler.
///
/// `Engine<W>` owns the logical clock, the pending-event queue, every live
/// process, every resource, and the run context `W` the processes share.
/// Separate engines share nothing, so independent runs can live side by side
/// in one program.
///
/// # Event loop
///
/// ```text
/// while the earliest pending event is due at or before `until`:
///   ① pop it (FIFO among events due at the same tick)
///   ② advance the clock to its due tick
///   ③ resume its process until the process suspends or finishes
///        Timeout(d) → push (now + d, process)
///        Acquire(r) → granted: keep running; busy: park in r's wait queue
///        Finish     → drop the process
/// discard whatever is left; move the clock to `until`
/// ```
pub struct Engine<W> {
    kernel: Kernel<W>,
    world:  W,
}

impl<W: 'static> Engine<W> {
    /// Create an engine at `Tick::ZERO` around the run context `world`.
    pub fn new(world: W) -> Self {
        Self {
            kernel: Kernel::new(),
            world,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.kernel.clock.now()
    }

    /// Number of events waiting to fire.
    pub fn pending(&self) -> usize {
        self.kernel.queue.len()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Consume the engine and hand back the run context.
    pub fn into_world(self) -> W {
        self.world
    }

    /// Read-only view of a resource.  Processes never inspect resources
    /// directly; this exists for callers and tests.
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.kernel.resources.get(id.index())
    }

    pub fn resources(&self) -> &[Resource] {
        &self.kernel.resources
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Create a free capacity-1 resource.
    pub fn add_resource(&mut self, name: impl Into<String>) -> ResourceId {
        let id = ResourceId(self.kernel.resources.len() as u32);
        self.kernel.resources.push(Resource::new(id, name));
        id
    }

    /// Register `process` to take its first step at the current tick.
    pub fn spawn(&mut self, process: Box<dyn Process<W>>) -> ProcessId {
        let now = self.now();
        self.kernel.spawn_at(now, process)
    }

    /// Register `process` to take its first step `delay` ticks from now.
    ///
    /// Fails with [`EngineError::InvalidDelay`] if `delay` is negative; the
    /// queue is left untouched.
    pub fn schedule(&mut self, delay: Delay, process: Box<dyn Process<W>>) -> EngineResult<ProcessId> {
        self.kernel.schedule(delay, process)
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Process every event due at or before `until`, then stop.
    ///
    /// Events due after `until` are discarded, and the clock ends at `until`
    /// (it never moves past it).  The first error raised by a process step
    /// aborts the run and is returned as is.
    pub fn run<O: EngineObserver>(&mut self, until: Tick, observer: &mut O) -> EngineResult<()> {
        while let Some(due) = self.kernel.queue.next_tick() {
            if due > until {
                break;
            }
            let Some((due, id)) = self.kernel.queue.pop() else {
                break;
            };

            let now = self.now();
            if due > now {
                self.kernel.clock.advance_to(due);
                debug!("clock {now} -> {due}");
                observer.on_advance(now, due);
            }

            self.dispatch(id, &mut *observer)?;
        }

        let discarded = self.kernel.queue.clear();
        if discarded > 0 {
            warn!("horizon {until} reached with {discarded} events still pending; discarded");
        }

        let now = self.now();
        if until > now {
            self.kernel.clock.advance_to(until);
            observer.on_advance(now, until);
        }
        observer.on_run_end(self.now(), discarded);
        Ok(())
    }

    /// Resume the process behind one fired event.
    fn dispatch(&mut self, id: ProcessId, observer: &mut dyn EngineObserver) -> EngineResult<()> {
        let mut process = self
            .kernel
            .processes
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(EngineError::UnknownProcess(id))?;

        match self.drive(id, process.as_mut(), observer) {
            Ok(true) => {
                debug!("{}: {} ({id}) finished", self.now(), process.label());
                Ok(())
            }
            result => {
                self.kernel.processes[id.index()] = Some(process);
                result.map(|_| ())
            }
        }
    }

    /// Step `process` until it suspends (`Ok(false)`) or finishes (`Ok(true)`).
    fn drive(
        &mut self,
        id:       ProcessId,
        process:  &mut dyn Process<W>,
        observer: &mut dyn EngineObserver,
    ) -> EngineResult<bool> {
        loop {
            let now = self.now();
            observer.on_resume(now, id);
            debug!("{now}: resume {} ({id})", process.label());

            let step = {
                let mut ctx = Context {
                    id,
                    kernel:   &mut self.kernel,
                    world:    &mut self.world,
                    observer: &mut *observer,
                };
                process.resume(&mut ctx)
            };
            let step = step.map_err(|source| EngineError::Process {
                process: id,
                label:   process.label(),
                tick:    now,
                source:  Box::new(source),
            })?;

            match step {
                Yield::Timeout(delay) => {
                    let due = now.checked_offset(delay).ok_or_else(|| EngineError::InvalidDelay {
                        process: Some(id),
                        label:   process.label(),
                        delay,
                        tick:    now,
                    })?;
                    self.kernel.queue.push(due, id);
                    return Ok(false);
                }
                Yield::Acquire(resource) => match self.kernel.resource_mut(resource)?.acquire(id) {
                    Acquired::Granted => {
                        observer.on_grant(now, resource, id);
                        trace!("{now}: {resource} granted to {id}");
                    }
                    Acquired::Queued { ahead } => {
                        trace!("{now}: {id} queued on {resource} behind {ahead}");
                        return Ok(false);
                    }
                },
                Yield::Finish => return Ok(true),
            }
        }
    }
}
