//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tasks.csv`
//! - `summaries.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, SummaryRow, TaskRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    tasks:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut tasks = Writer::from_path(dir.join("tasks.csv"))?;
        tasks.write_record([
            "run",
            "task_id",
            "server_id",
            "arrival_time",
            "completion_time",
            "response_time",
        ])?;

        let mut summaries = Writer::from_path(dir.join("summaries.csv"))?;
        summaries.write_record(["run", "policy", "arrival_rate", "et", "std_t", "num_tasks"])?;

        Ok(Self { tasks, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tasks(&mut self, rows: &[TaskRow]) -> OutputResult<()> {
        for row in rows {
            self.tasks.write_record(&[
                row.run.to_string(),
                row.task_id.to_string(),
                row.server_id.to_string(),
                row.arrival_time.to_string(),
                row.completion_time.to_string(),
                row.response_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.policy.clone(),
            row.arrival_rate.to_string(),
            row.et.to_string(),
            row.std_t.to_string(),
            row.num_tasks.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.tasks.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
