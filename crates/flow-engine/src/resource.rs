//! `Resource` — a capacity-1 mutual-exclusion gate with a FIFO wait queue.
//!
//! The resource only tracks who holds it and who is waiting.  It never touches
//! the clock or the event queue; the engine turns a hand-over into a wake-up
//! of the new holder at the current tick.

use std::collections::VecDeque;

use flow_core::{ProcessId, ResourceId, Tick};

use crate::{EngineError, EngineResult};

/// Outcome of [`Resource::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    /// The requester now holds the resource.
    Granted,
    /// The requester was appended to the wait queue; `ahead` waiters are in
    /// front of it.
    Queued { ahead: usize },
}

#[derive(Debug)]
pub struct Resource {
    id:      ResourceId,
    name:    String,
    holder:  Option<ProcessId>,
    waiting: VecDeque<ProcessId>,
}

impl Resource {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            holder: None,
            waiting: VecDeque::new(),
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holder(&self) -> Option<ProcessId> {
        self.holder
    }

    pub fn in_use(&self) -> bool {
        self.holder.is_some()
    }

    /// Waiters in grant order.
    pub fn waiting(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Grant the resource to `requester` if it is free, otherwise queue it.
    ///
    /// A free resource always has an empty queue: release hands it straight
    /// to the front waiter.
    pub fn acquire(&mut self, requester: ProcessId) -> Acquired {
        debug_assert!(
            self.holder != Some(requester) && !self.waiting.contains(&requester),
            "{requester} requested {} twice",
            self.name
        );

        if self.holder.is_none() {
            debug_assert!(self.waiting.is_empty(), "{} is free with waiters queued", self.name);
            self.holder = Some(requester);
            return Acquired::Granted;
        }

        let ahead = self.waiting.len();
        self.waiting.push_back(requester);
        Acquired::Queued { ahead }
    }

    /// Release the resource held by `requester`.
    ///
    /// Returns the waiter that now holds it, if any.  Fails with
    /// [`EngineError::NotHolder`] when `requester` is not the holder; the
    /// resource is left untouched in that case.
    pub fn release(&mut self, requester: ProcessId, now: Tick) -> EngineResult<Option<ProcessId>> {
        if self.holder != Some(requester) {
            return Err(EngineError::NotHolder {
                resource: self.id,
                name: self.name.clone(),
                requester,
                holder: self.holder,
                tick: now,
            });
        }

        self.holder = self.waiting.pop_front();
        Ok(self.holder)
    }
}
