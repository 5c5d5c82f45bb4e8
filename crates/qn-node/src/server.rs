//! Single-queue, single-processor station.

use std::collections::VecDeque;

use qn_agent::ServerLoad;
use qn_core::{NodeId, SimTime, Task};
use tracing::debug;

use crate::{Node, NodeError, NodeKind, NodeResult};

#[derive(Debug, Clone, Copy)]
struct InService {
    task:        Task,
    finishes_at: SimTime,
}

/// A FIFO, non-preemptive server.
///
/// The server does not own a clock.  [`accept`][Self::accept] and
/// [`complete`][Self::complete] return the finish time of any task they put
/// into service, and the caller schedules the matching completion event.
///
/// Invariant: a task is in service whenever the queue is non-empty, so
/// "busy" and "has work" are the same thing.
#[derive(Debug)]
pub struct Server {
    id:         NodeId,
    queue:      VecDeque<Task>,
    in_service: Option<InService>,
    completed:  u64,
}

impl Server {
    pub fn new(id: NodeId) -> Self {
        Self { id, queue: VecDeque::new(), in_service: None, completed: 0 }
    }

    /// Enqueue `task` at the tail.  If the server was idle the task starts
    /// immediately and its finish time is returned.
    pub fn accept(&mut self, task: Task, now: SimTime) -> Option<SimTime> {
        self.queue.push_back(task);
        if self.in_service.is_none() { self.start_next(now) } else { None }
    }

    /// Finish the task in service and start the next queued one, if any.
    ///
    /// Returns the finished task and the finish time of the newly started
    /// task.
    pub fn complete(&mut self, now: SimTime) -> NodeResult<(Task, Option<SimTime>)> {
        let done = self.in_service.take().ok_or(NodeError::NotInService(self.id))?;
        self.completed += 1;
        debug!(server = %self.id, task = done.task.id.0, %now, "service complete");
        let next = self.start_next(now);
        Ok((done.task, next))
    }

    fn start_next(&mut self, now: SimTime) -> Option<SimTime> {
        let task = self.queue.pop_front()?;
        let finishes_at = now + task.service_time;
        debug!(server = %self.id, task = task.id.0, %now, %finishes_at, "service start");
        self.in_service = Some(InService { task, finishes_at });
        Some(finishes_at)
    }

    /// Remaining time of the task in service plus the service times of every
    /// queued task.
    pub fn work_left(&self, now: SimTime) -> f64 {
        let current = self
            .in_service
            .map(|s| s.finishes_at.since(now).max(0.0))
            .unwrap_or(0.0);
        current + self.queue.iter().map(|t| t.service_time).sum::<f64>()
    }

    /// Queued tasks plus the one in service.
    pub fn tasks_left(&self) -> usize {
        self.queue.len() + usize::from(self.in_service.is_some())
    }

    /// Tasks waiting behind the one in service.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_busy(&self) -> bool {
        self.in_service.is_some()
    }

    /// The task in service, if any.
    pub fn current_task(&self) -> Option<&Task> {
        self.in_service.as_ref().map(|s| &s.task)
    }

    /// Tasks completed so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Snapshot for routing decisions.
    pub fn load(&self, now: SimTime) -> ServerLoad {
        ServerLoad { id: self.id, work_left: self.work_left(now), tasks_left: self.tasks_left() }
    }
}

impl Node for Server {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Server
    }
}
