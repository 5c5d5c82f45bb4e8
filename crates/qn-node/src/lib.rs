//! `qn-node` — the nodes of the queueing network.
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`node`]   | `Node` trait, `NodeKind`                           |
//! | [`source`] | `Source`, `NewTask`                                |
//! | [`server`] | `Server` (FIFO, one task in service)               |
//! | [`sink`]   | `Sink` (response times, agent feedback)            |
//! | [`error`]  | `NodeError`, `NodeResult<T>`                       |
//!
//! Nodes hold state only.  They never own the clock or the event queue;
//! the simulator passes `now` in and schedules whatever times they return.

pub mod error;
pub mod node;
pub mod server;
pub mod sink;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{NodeError, NodeResult};
pub use node::{Node, NodeKind};
pub use server::Server;
pub use sink::Sink;
pub use source::{NewTask, Source};
