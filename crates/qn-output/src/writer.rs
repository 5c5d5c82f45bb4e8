//! The `OutputWriter` trait implemented by output backends.

use crate::{OutputResult, SummaryRow, TaskRow};

/// Sink for task and summary rows.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver], errors
/// are stored and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of completed tasks.
    fn write_tasks(&mut self, rows: &[TaskRow]) -> OutputResult<()>;

    /// Write one run summary.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Lets an observer borrow a writer that outlives a single run.
impl<W: OutputWriter + ?Sized> OutputWriter for &mut W {
    fn write_tasks(&mut self, rows: &[TaskRow]) -> OutputResult<()> {
        (**self).write_tasks(rows)
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        (**self).write_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
