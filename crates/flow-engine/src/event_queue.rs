//! `EventQueue` — time-ordered queue of pending continuations.
//!
//! Entries are keyed by due tick; entries sharing a tick pop in the order they
//! were pushed.  That tie rule is what makes two runs of the same
//! configuration resume processes in the same order.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) push and pop where W = number of distinct due
//! ticks currently enqueued.  A flow line with M machines has at most a few
//! events per job in flight, so W stays small.

use std::collections::{BTreeMap, VecDeque};

use flow_core::Tick;

/// A priority queue mapping due ticks → items, FIFO within a tick.
#[derive(Debug)]
pub struct EventQueue<T> {
    inner: BTreeMap<Tick, VecDeque<T>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `item` to fire at `tick`, behind everything already due then.
    pub fn push(&mut self, tick: Tick, item: T) {
        self.inner.entry(tick).or_default().push_back(item);
        self.total += 1;
    }

    /// Remove and return the earliest entry.
    ///
    /// Among entries due at the same tick, the one pushed first is returned
    /// first.  An item pushed at the current earliest tick while that tick is
    /// being drained lands behind the items already waiting there.
    pub fn pop(&mut self) -> Option<(Tick, T)> {
        let mut entry = self.inner.first_entry()?;
        let tick = *entry.key();
        let item = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((tick, item))
    }

    /// The earliest tick with at least one entry, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Drop every entry.  Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.total;
        self.inner.clear();
        self.total = 0;
        dropped
    }

    /// Total number of entries across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct ticks that have at least one entry.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
