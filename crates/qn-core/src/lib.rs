//! `qn-core` — foundational types for the `rust_qn` queueing simulator.
//!
//! This crate is a dependency of every other `qn-*` crate.  It has no `qn-*`
//! dependencies and only a handful of external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `TaskId`                                         |
//! | [`time`]   | `SimTime`                                                  |
//! | [`rng`]    | `SimRng` (per-run streams)                                 |
//! | [`rv`]     | `RandomVariable` trait and the stock distributions         |
//! | [`task`]   | `Task`, `Experience`                                       |
//! | [`stats`]  | `SimResult` (mean / std of response time)                  |
//! | [`config`] | `SimConfig`                                                |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time, config, stats.|

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod rv;
pub mod stats;
pub mod task;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{NodeId, TaskId};
pub use rng::SimRng;
pub use rv::{Constant, CustomDiscrete, DiscreteUniform, Exponential, RandomVariable};
pub use stats::SimResult;
pub use task::{Experience, Task};
pub use time::SimTime;
