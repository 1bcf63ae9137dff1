//! A machine on the line.

use flow_core::{MachineId, ResourceId};

/// One station of the flow line.
///
/// Created once per run by the builder and never changed afterwards; the only
/// mutable state behind a machine is its resource's wait queue, which lives in
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub id:       MachineId,
    pub name:     String,
    /// The capacity-1 resource that serialises jobs on this machine.
    pub resource: ResourceId,
}

impl Machine {
    pub fn new(id: MachineId, name: impl Into<String>, resource: ResourceId) -> Self {
        Self {
            id,
            name: name.into(),
            resource,
        }
    }

    /// Default name for the machine at 0-based position `index`.
    pub fn default_name(index: usize) -> String {
        format!("Machine_{}", index + 1)
    }
}
