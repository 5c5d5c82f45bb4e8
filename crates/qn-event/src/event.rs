//! Event kinds processed by the simulation loop.

use qn_core::{NodeId, SimTime};

/// Something that happens at a point in simulated time.
///
/// These are the two suspension points of the network: the source waiting
/// for its next arrival, and a server waiting for its task in service to
/// finish.  Routing and sink bookkeeping happen inside these handlers with
/// no time passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The source's inter-arrival wait has elapsed: generate and route a task.
    Arrival,
    /// The task in service at `server` is done.
    ServiceComplete { server: NodeId },
}

/// Handle to a scheduled event, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    pub time: SimTime,
    pub seq:  u64,
}
