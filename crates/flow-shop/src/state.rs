//! Run context shared by every process of one flow-shop run.

use crate::{Machine, StatisticsLog};

/// The per-run state the engine hands to job and generator processes.
///
/// One `ShopState` per engine; nothing here is global, so independent runs
/// never observe each other.
#[derive(Debug, Default)]
pub struct ShopState {
    /// Machines in visitation order.
    pub machines: Vec<Machine>,
    pub stats:    StatisticsLog,
}

impl ShopState {
    pub fn new(machine_count: usize) -> Self {
        Self {
            machines: Vec::with_capacity(machine_count),
            stats:    StatisticsLog::new(machine_count),
        }
    }
}
