//! Plain data row types written by output backends.

/// One completed task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskRow {
    /// Run the task belongs to; matches [`SummaryRow::run`].
    pub run:             u32,
    pub task_id:         u64,
    pub server_id:       u32,
    pub arrival_time:    f64,
    pub completion_time: f64,
    pub response_time:   f64,
}

/// End-of-run summary for one policy at one arrival rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub run:          u32,
    pub policy:       String,
    pub arrival_rate: f64,
    pub et:           f64,
    pub std_t:        f64,
    pub num_tasks:    usize,
}

/// Labels attached to every row a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub run:          u32,
    pub policy:       String,
    pub arrival_rate: f64,
}
