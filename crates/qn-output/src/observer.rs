//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use qn_core::{SimResult, SimTime, Task};
use qn_sim::SimObserver;

use crate::row::{RunInfo, SummaryRow, TaskRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Task rows are buffered and written in batches of this size.
const TASK_BATCH: usize = 1024;

/// A [`SimObserver`] that writes one row per completed task and a summary
/// row at the end of the run.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
///
/// The observer does not finish the writer, so one writer can collect
/// several runs: take it back with [`into_writer`][Self::into_writer] and
/// call [`OutputWriter::finish`] once at the end.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    info:       RunInfo,
    pending:    Vec<TaskRow>,
    log_tasks:  bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer` that labels its rows with `info`.
    pub fn new(writer: W, info: RunInfo) -> Self {
        Self {
            writer,
            info,
            pending:    Vec::new(),
            log_tasks:  true,
            last_error: None,
        }
    }

    /// Write only the summary row, skipping per-task rows.
    pub fn summary_only(mut self) -> Self {
        self.log_tasks = false;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to reuse it for the next run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_tasks(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_tasks(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_task_completed(&mut self, task: &Task, now: SimTime) {
        if !self.log_tasks {
            return;
        }
        self.pending.push(TaskRow {
            run:             self.info.run,
            task_id:         task.id.0,
            server_id:       task.assigned_node_id.0,
            arrival_time:    task.arrival_time.as_f64(),
            completion_time: now.as_f64(),
            response_time:   task.response_time(now),
        });
        if self.pending.len() >= TASK_BATCH {
            self.flush_tasks();
        }
    }

    fn on_sim_end(&mut self, _now: SimTime, result: &SimResult) {
        self.flush_tasks();
        let row = SummaryRow {
            run:          self.info.run,
            policy:       self.info.policy.clone(),
            arrival_rate: self.info.arrival_rate,
            et:           result.et,
            std_t:        result.std_t,
            num_tasks:    result.num_tasks,
        };
        let result = self.writer.write_summary(&row);
        self.store_err(result);
    }
}
