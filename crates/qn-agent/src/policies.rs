//! Static routing policies.  None of them look at history.

use qn_core::{NodeId, RandomVariable, SimRng};

use crate::load::argmin_by;
use crate::{AgentError, AgentResult, SchedulingAgent, ServerLoad};

// ── Random ────────────────────────────────────────────────────────────────────

/// Uniform choice over servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignToRandom;

impl SchedulingAgent for AssignToRandom {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&mut self, servers: &[ServerLoad], rng: &mut SimRng) -> AgentResult<NodeId> {
        if servers.is_empty() {
            return Err(AgentError::NoServers);
        }
        Ok(servers[rng.gen_range(0..servers.len())].id)
    }
}

// ── LeastWorkLeft ─────────────────────────────────────────────────────────────

/// Send to the server with the least remaining work.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignToLeastWorkLeft;

impl SchedulingAgent for AssignToLeastWorkLeft {
    fn name(&self) -> &'static str {
        "least-work-left"
    }

    fn select(&mut self, servers: &[ServerLoad], _rng: &mut SimRng) -> AgentResult<NodeId> {
        if servers.is_empty() {
            return Err(AgentError::NoServers);
        }
        Ok(argmin_by(servers, |s| s.work_left))
    }
}

// ── NoisyLeastWorkLeft ────────────────────────────────────────────────────────

/// Least-work-left on a distorted view: each server's work is multiplied by
/// a fresh draw of `noise` on every call.
///
/// Models a router that only has an estimate of the servers' backlog.  A
/// negative factor would invert the ordering, so `select` rejects one.
#[derive(Debug)]
pub struct AssignToNoisyLeastWorkLeft {
    noise: Box<dyn RandomVariable>,
}

impl AssignToNoisyLeastWorkLeft {
    pub fn new(noise: Box<dyn RandomVariable>) -> Self {
        Self { noise }
    }
}

impl SchedulingAgent for AssignToNoisyLeastWorkLeft {
    fn name(&self) -> &'static str {
        "noisy-least-work-left"
    }

    fn select(&mut self, servers: &[ServerLoad], rng: &mut SimRng) -> AgentResult<NodeId> {
        if servers.is_empty() {
            return Err(AgentError::NoServers);
        }
        let factors: Vec<f64> = servers.iter().map(|_| self.noise.sample(rng)).collect();
        if let Some(f) = factors.iter().find(|f| !(**f >= 0.0)) {
            return Err(AgentError::Config(format!(
                "noise factor must be non-negative, got {f}"
            )));
        }
        // argmin_by visits servers in slice order.
        let mut factors = factors.into_iter();
        Ok(argmin_by(servers, |s| s.work_left * factors.next().unwrap_or(1.0)))
    }
}

// ── FewestTasksLeft ───────────────────────────────────────────────────────────

/// Send to the server with the fewest tasks, ignoring their sizes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignToFewestTasksLeft;

impl SchedulingAgent for AssignToFewestTasksLeft {
    fn name(&self) -> &'static str {
        "fewest-tasks-left"
    }

    fn select(&mut self, servers: &[ServerLoad], _rng: &mut SimRng) -> AgentResult<NodeId> {
        if servers.is_empty() {
            return Err(AgentError::NoServers);
        }
        Ok(argmin_by(servers, |s| s.tasks_left as f64))
    }
}
