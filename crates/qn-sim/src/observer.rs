//! Simulation observer trait for progress reporting and data collection.

use qn_core::{SimResult, SimTime, Task};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] as tasks
/// move through the network.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// struct Counter(u64);
///
/// impl SimObserver for Counter {
///     fn on_task_completed(&mut self, _task: &Task, _now: SimTime) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the agent has chosen a server, before the server accepts
    /// the task.
    fn on_task_routed(&mut self, _task: &Task, _now: SimTime) {}

    /// Called when a server finishes a task, before the sink records it.
    fn on_task_completed(&mut self, _task: &Task, _now: SimTime) {}

    /// Called once after the sink has reached its target.
    fn on_sim_end(&mut self, _now: SimTime, _result: &SimResult) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
