//! `qn-sim` — discrete-event loop of the rust_qn queueing simulator.
//!
//! # Event loop
//!
//! ```text
//! build():  config.validate(), agent = factory(server_ids), split RNG
//!           streams (arrivals, service, routing)            → Idle
//! run():    schedule first Arrival                          → Running
//!   pop earliest (time, seq) event, clock = time
//!     Arrival            → generate, select, accept, schedule next arrival
//!     ServiceComplete(s) → complete, sink.on_complete (+ agent feedback),
//!                          start next queued task
//!   until the sink reports its target
//!   cancel pending arrival, summarise                       → Completed
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replicates on Rayon's thread pool.                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qn_agent::AssignToLeastWorkLeft;
//! use qn_core::{Exponential, SimConfig};
//! use qn_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::new(2, 10_000, 42);
//! let mut sim = SimBuilder::new(
//!     config,
//!     Arc::new(Exponential::new(1.6)?),
//!     Arc::new(Exponential::new(1.0)?),
//!     |_| Ok(AssignToLeastWorkLeft),
//! )
//! .build()?;
//! let result = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod replicate;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{RunResult, SimError};
pub use observer::{NoopObserver, SimObserver};
pub use replicate::{Replicates, run_replicates};
pub use sim::{SimState, Simulator};
