//! The `SchedulingAgent` trait, the routing extension point.

use qn_core::{Experience, NodeId, SimRng};

use crate::{AgentResult, ServerLoad};

/// Pluggable routing policy.
///
/// Each arriving task triggers one [`select`][Self::select] call with a
/// snapshot of every server.  The agent returns the id of the server that
/// receives the task.
///
/// Randomised policies draw from the `rng` argument, a stream reserved for
/// routing, so their draws never disturb the arrival or service sequences.
///
/// # Adaptive agents
///
/// Agents that learn from completed tasks also implement [`OnlineLearning`]
/// and return `Some(self)` from [`learner`][Self::learner].  The sink uses
/// that hook to deliver one [`Experience`] per completion.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysFirst;
///
/// impl SchedulingAgent for AlwaysFirst {
///     fn name(&self) -> &'static str { "always-first" }
///     fn select(&mut self, servers: &[ServerLoad], _rng: &mut SimRng) -> AgentResult<NodeId> {
///         servers.first().map(|s| s.id).ok_or(AgentError::NoServers)
///     }
/// }
/// ```
pub trait SchedulingAgent: Send {
    /// Short human-readable policy name, used in logs and result tables.
    fn name(&self) -> &'static str;

    /// Pick the server that receives the next task.
    ///
    /// Fails with [`AgentError::NoServers`][crate::AgentError::NoServers]
    /// when `servers` is empty.
    fn select(&mut self, servers: &[ServerLoad], rng: &mut SimRng) -> AgentResult<NodeId>;

    /// Feedback hook for adaptive agents.  Static policies keep the default.
    fn learner(&mut self) -> Option<&mut dyn OnlineLearning> {
        None
    }
}

/// Agents that update their beliefs from completed tasks.
pub trait OnlineLearning {
    /// Record one observation.
    ///
    /// Fails with [`AgentError::UnknownNode`][crate::AgentError::UnknownNode]
    /// if the experience names a server the agent was not built with.
    fn ingest(&mut self, experience: Experience) -> AgentResult<()>;
}

impl<A: SchedulingAgent + ?Sized> SchedulingAgent for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select(&mut self, servers: &[ServerLoad], rng: &mut SimRng) -> AgentResult<NodeId> {
        (**self).select(servers, rng)
    }

    fn learner(&mut self) -> Option<&mut dyn OnlineLearning> {
        (**self).learner()
    }
}
