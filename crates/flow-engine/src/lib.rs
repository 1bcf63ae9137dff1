//! `flow-engine` — discrete-event scheduler for the flow-shop simulator.
//!
//! # Model
//!
//! A single logical thread of control.  Processes are explicit state machines
//! ([`Process`]) resumed one at a time by the [`Engine`]; no step ever runs in
//! parallel with another, so shared state needs no locking.  A process
//! suspends only when it
//!
//! - sleeps for a number of ticks (`Yield::Timeout`), or
//! - requests a [`Resource`] someone else holds (`Yield::Acquire`).
//!
//! # Ordering
//!
//! | Situation                          | Rule                                  |
//! |------------------------------------|---------------------------------------|
//! | Several events due at one tick     | FIFO by the order they were scheduled |
//! | Several requesters on one resource | FIFO by request order                 |
//! | Release with waiters               | Front waiter holds it at once, resumes later this tick |
//!
//! # Crate layout
//!
//! | Module          | Contents                                           |
//! |-----------------|----------------------------------------------------|
//! | [`event_queue`] | `EventQueue` (`BTreeMap<Tick, VecDeque<T>>`)        |
//! | [`resource`]    | `Resource`, `Acquired`                             |
//! | [`process`]     | `Process` trait, `Yield`, `Context`, `from_fn`     |
//! | [`engine`]      | `Engine`                                           |
//! | [`observer`]    | `EngineObserver`, `NoopObserver`, `EventTrace`     |
//! | [`error`]       | `EngineError`, `EngineResult<T>`                   |

pub mod engine;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod process;
pub mod resource;


pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use event_queue::EventQueue;
pub use observer::{EngineObserver, EventTrace, NoopObserver, TraceEvent};
pub use process::{Context, FnProcess, Process, Yield, from_fn};
pub use resource::{Acquired, Resource};
