//! Task generator.

use std::sync::Arc;

use qn_core::{CoreError, NodeId, RandomVariable, SimRng, SimTime, Task, TaskId};
use qn_event::{Event, EventKey, EventQueue};
use tracing::debug;

use crate::{Node, NodeKind, NodeResult};

/// A task that has been stamped but not yet routed.
///
/// The server is only known after the scheduling agent has seen the current
/// loads, so the source hands out a `NewTask` and the caller turns it into a
/// [`Task`] with [`route_to`][Self::route_to].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTask {
    pub id:           TaskId,
    pub arrival_time: SimTime,
    pub service_time: f64,
}

impl NewTask {
    pub fn route_to(self, server: NodeId) -> Task {
        Task::new(self.id, self.arrival_time, self.service_time, server)
    }
}

/// Generates tasks at stochastic intervals.
///
/// The source drives itself through a single pending [`Event::Arrival`]:
/// each arrival handler calls [`schedule_next`][Self::schedule_next] again,
/// until the optional generation cap is hit or the run is stopped with
/// [`cancel`][Self::cancel].
#[derive(Debug)]
pub struct Source {
    id:            NodeId,
    inter_arrival: Arc<dyn RandomVariable>,
    service:       Arc<dyn RandomVariable>,
    arrival_rng:   SimRng,
    service_rng:   SimRng,
    generated:     u64,
    cap:           Option<u64>,
    pending:       Option<EventKey>,
}

impl Source {
    pub fn new(
        id:            NodeId,
        inter_arrival: Arc<dyn RandomVariable>,
        service:       Arc<dyn RandomVariable>,
        arrival_rng:   SimRng,
        service_rng:   SimRng,
        cap:           Option<u64>,
    ) -> Self {
        Self {
            id,
            inter_arrival,
            service,
            arrival_rng,
            service_rng,
            generated: 0,
            cap,
            pending: None,
        }
    }

    /// Sample the next inter-arrival time and schedule the arrival.
    ///
    /// Returns `Ok(false)` without scheduling anything once the generation
    /// cap has been reached.
    pub fn schedule_next(&mut self, events: &mut EventQueue, now: SimTime) -> NodeResult<bool> {
        if self.cap.is_some_and(|cap| self.generated >= cap) {
            debug!(generated = self.generated, "generation cap reached");
            self.pending = None;
            return Ok(false);
        }
        let wait = CoreError::check_duration(
            "inter-arrival",
            self.inter_arrival.sample(&mut self.arrival_rng),
        )?;
        self.pending = Some(events.schedule(now + wait, Event::Arrival));
        Ok(true)
    }

    /// Handle a due arrival: sample a service time and stamp a new task with
    /// the current clock.
    pub fn generate(&mut self, now: SimTime) -> NodeResult<NewTask> {
        let service_time =
            CoreError::check_duration("service", self.service.sample(&mut self.service_rng))?;
        let id = TaskId(self.generated);
        self.generated += 1;
        self.pending = None;
        Ok(NewTask { id, arrival_time: now, service_time })
    }

    /// Withdraw the pending arrival, if any.  The clock is not touched.
    pub fn cancel(&mut self, events: &mut EventQueue) -> bool {
        match self.pending.take() {
            Some(key) => events.cancel(key).is_some(),
            None => false,
        }
    }

    /// Tasks generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn has_pending_arrival(&self) -> bool {
        self.pending.is_some()
    }
}

impl Node for Source {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Source
    }
}
