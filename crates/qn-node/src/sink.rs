//! Terminal collector of completed tasks.

use qn_agent::OnlineLearning;
use qn_core::{Experience, NodeId, SimResult, SimTime, Task};
use tracing::info;

use crate::{Node, NodeKind, NodeResult};

/// Records response times and feeds them back to an adaptive agent.
#[derive(Debug)]
pub struct Sink {
    id:             NodeId,
    target:         u64,
    received:       u64,
    response_times: Vec<f64>,
}

impl Sink {
    pub fn new(id: NodeId, target: u64) -> Self {
        let capacity = usize::try_from(target).unwrap_or(0).min(1 << 20);
        Self { id, target, received: 0, response_times: Vec::with_capacity(capacity) }
    }

    /// Record a completed task.
    ///
    /// Returns `true` exactly once: on the completion that brings the count
    /// to the target.  Later completions are still counted.
    pub fn on_complete(
        &mut self,
        task:    &Task,
        now:     SimTime,
        learner: Option<&mut dyn OnlineLearning>,
    ) -> NodeResult<bool> {
        let experience = Experience::from_completion(task, now);
        self.response_times.push(experience.observed_value);
        self.received += 1;
        if let Some(learner) = learner {
            learner.ingest(experience)?;
        }
        let reached = self.received == self.target;
        if reached {
            info!(received = self.received, %now, "sink reached target");
        }
        Ok(reached)
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.received >= self.target
    }

    /// Response times in completion order.
    pub fn response_times(&self) -> &[f64] {
        &self.response_times
    }

    pub fn result(&self) -> SimResult {
        SimResult::from_response_times(&self.response_times)
    }
}

impl Node for Sink {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sink
    }
}
