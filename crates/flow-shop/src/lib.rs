//! `flow-shop` — a serial production line simulated on `flow-engine`.
//!
//! # Model
//!
//! ```text
//! generator ──every arrival_interval──▶ job 1, job 2, …
//!
//! job:  Machine_1 ─▶ Machine_2 ─▶ … ─▶ Machine_N ─▶ statistics log
//!       (queue, hold for processing_times[i], release)
//! ```
//!
//! Each machine is a capacity-1 FIFO resource.  Jobs arrive at
//! `k * arrival_interval`, visit every machine in order and record their
//! start, end and per-machine waiting times when they leave the last one.
//! The run stops at the horizon; unfinished jobs leave no record.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_many` runs configurations on Rayon's thread pool. |
//! | `serde`    | `Serialize`/`Deserialize` on statistics and config.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use flow_core::{JobSpec, RunConfig};
//!
//! let config = RunConfig {
//!     horizon:          100,
//!     machine_count:    3,
//!     arrival_interval: 5,
//!     jobs: vec![JobSpec::new(1, &[3, 2, 4]), JobSpec::new(2, &[2, 3, 3])],
//! };
//! let stats = flow_shop::run_simulation(&config)?;
//! println!("mean cycle time {:?}", stats.mean_cycle_time());
//! ```

pub mod builder;
pub mod error;
mod generator;
pub mod job;
pub mod machine;
pub mod shop;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::FlowShopBuilder;
pub use error::{ShopError, ShopResult};
pub use job::Job;
pub use machine::Machine;
pub use shop::{FlowShop, run_many, run_simulation};
pub use state::ShopState;
pub use stats::{CompletedJob, StatisticsLog};
