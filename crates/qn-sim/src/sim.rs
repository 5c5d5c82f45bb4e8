//! The `Simulator` struct and its event loop.

use std::fmt;

use qn_agent::{SchedulingAgent, ServerLoad};
use qn_core::{NodeId, SimConfig, SimResult, SimRng, SimTime};
use qn_event::{Event, EventQueue};
use qn_node::{Node, Server, Sink, Source};
use tracing::{debug, info};

use crate::{RunResult, SimError, SimObserver};

/// Lifecycle of a [`Simulator`].  Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Idle,
    Running,
    Completed,
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SimState::Idle => "idle",
            SimState::Running => "running",
            SimState::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// One run of the network: a source, `num_servers` FIFO servers, a sink, and
/// the scheduling agent `A`.
///
/// The loop pops events in `(time, seq)` order:
///
/// ```text
/// Arrival            → source stamps a task, agent picks a server,
///                      server accepts it, next arrival is scheduled
/// ServiceComplete(s) → server s hands its task to the sink and starts
///                      the next queued task; the sink feeds the agent
/// ```
///
/// The run stops at the completion that brings the sink to its target.  The
/// pending arrival is then withdrawn without advancing the clock.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulator<A: SchedulingAgent> {
    pub(crate) config:    SimConfig,
    pub(crate) state:     SimState,
    pub(crate) clock:     SimTime,
    pub(crate) events:    EventQueue,
    pub(crate) source:    Source,
    pub(crate) servers:   Vec<Server>,
    pub(crate) sink:      Sink,
    pub(crate) agent:     A,
    pub(crate) route_rng: SimRng,
    /// Reused snapshot buffer handed to `select`.
    pub(crate) loads:     Vec<ServerLoad>,
}

impl<A: SchedulingAgent> Simulator<A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the sink has received `num_tasks_to_recv` tasks and return
    /// the response-time summary.
    ///
    /// A simulator runs once; calling `run` again fails with
    /// [`SimError::NotIdle`].  Use [`NoopObserver`][crate::NoopObserver] if
    /// you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunResult<SimResult> {
        if self.state != SimState::Idle {
            return Err(SimError::NotIdle(self.state));
        }
        self.state = SimState::Running;
        info!(
            agent = self.agent.name(),
            servers = self.servers.len(),
            target = self.sink.target(),
            "simulation start"
        );

        self.source.schedule_next(&mut self.events, self.clock)?;

        loop {
            let Some((time, event)) = self.events.pop() else {
                return Err(SimError::Stalled {
                    received: self.sink.received(),
                    target:   self.sink.target(),
                });
            };
            self.clock = time;
            let done = match event {
                Event::Arrival => {
                    self.on_arrival(observer)?;
                    false
                }
                Event::ServiceComplete { server } => self.on_service_complete(server, observer)?,
            };
            if done {
                break;
            }
        }

        self.source.cancel(&mut self.events);
        self.state = SimState::Completed;

        let result = self.sink.result();
        info!(
            agent = self.agent.name(),
            generated = self.source.generated(),
            clock = %self.clock,
            %result,
            "simulation complete"
        );
        observer.on_sim_end(self.clock, &result);
        Ok(result)
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Current simulated time.
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Events still in the queue (completions of tasks beyond the target).
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn on_arrival<O: SimObserver>(&mut self, observer: &mut O) -> RunResult<()> {
        let now = self.clock;
        let new_task = self.source.generate(now)?;

        self.loads.clear();
        self.loads.extend(self.servers.iter().map(|s| s.load(now)));
        let chosen = self.agent.select(&self.loads, &mut self.route_rng)?;

        let server = self
            .servers
            .get_mut(chosen.index())
            .filter(|s| s.id() == chosen)
            .ok_or(SimError::UnknownServer(chosen))?;

        let task = new_task.route_to(chosen);
        debug!(task = task.id.0, server = %chosen, %now, service = task.service_time, "task routed");
        observer.on_task_routed(&task, now);

        if let Some(finish) = server.accept(task, now) {
            self.events.schedule(finish, Event::ServiceComplete { server: chosen });
        }

        self.source.schedule_next(&mut self.events, now)?;
        Ok(())
    }

    /// Returns `true` when this completion brought the sink to its target.
    fn on_service_complete<O: SimObserver>(
        &mut self,
        server_id: NodeId,
        observer:  &mut O,
    ) -> RunResult<bool> {
        let now = self.clock;
        let server = self
            .servers
            .get_mut(server_id.index())
            .ok_or(SimError::UnknownServer(server_id))?;

        let (task, next_finish) = server.complete(now)?;
        observer.on_task_completed(&task, now);
        let reached = self.sink.on_complete(&task, now, self.agent.learner())?;

        if let Some(finish) = next_finish {
            self.events.schedule(finish, Event::ServiceComplete { server: server_id });
        }
        Ok(reached)
    }
}
