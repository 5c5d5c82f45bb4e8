//! Value records that flow through the network.

use crate::{NodeId, SimTime, TaskId};

/// One unit of work.
///
/// Built by the source only after the scheduling agent has chosen a server,
/// so `assigned_node_id` is fixed for the task's whole life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    pub id:               TaskId,
    /// Clock value at which the source generated the task.
    pub arrival_time:     SimTime,
    /// Time the task occupies a server once it reaches the head of the queue.
    pub service_time:     f64,
    /// Server that received the task.
    pub assigned_node_id: NodeId,
}

impl Task {
    pub fn new(id: TaskId, arrival_time: SimTime, service_time: f64, assigned_node_id: NodeId) -> Self {
        Self { id, arrival_time, service_time, assigned_node_id }
    }

    /// Completion time minus arrival time.
    #[inline]
    pub fn response_time(&self, completed_at: SimTime) -> f64 {
        completed_at.since(self.arrival_time)
    }
}

/// Feedback observation for an online-learning agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experience {
    /// Server that handled the task.
    pub node_id:        NodeId,
    /// The task's response time.
    pub observed_value: f64,
    /// Clock value at which the task completed.
    pub time_epoch:     SimTime,
}

impl Experience {
    /// Turn a completed task into an observation for the server that served it.
    pub fn from_completion(task: &Task, completed_at: SimTime) -> Self {
        Self {
            node_id:        task.assigned_node_id,
            observed_value: task.response_time(completed_at),
            time_epoch:     completed_at,
        }
    }
}
