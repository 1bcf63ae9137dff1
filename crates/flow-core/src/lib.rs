//! `flow-core` — foundational types for the flow-shop simulator.
//!
//! This crate is a dependency of every other `flow-*` crate.  It has no
//! `flow-*` dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `JobId`, `MachineId`, `ProcessId`, `ResourceId`            |
//! | [`time`]   | `Tick`, `Delay`, `SimClock`                                |
//! | [`config`] | `RunConfig`, `JobSpec`                                     |
//! | [`error`]  | `ConfigError`, `ConfigResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{JobSpec, RunConfig};
pub use error::{ConfigError, ConfigResult};
pub use ids::{JobId, MachineId, ProcessId, ResourceId};
pub use time::{Delay, SimClock, Tick};
