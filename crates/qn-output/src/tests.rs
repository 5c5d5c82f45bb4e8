//! Integration tests for qn-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{SummaryRow, TaskRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn task_row(task_id: u64, server_id: u32) -> TaskRow {
        TaskRow {
            run: 0,
            task_id,
            server_id,
            arrival_time: task_id as f64,
            completion_time: task_id as f64 + 1.5,
            response_time: 1.5,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tasks.csv").exists());
        assert!(dir.path().join("summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tasks.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tasks.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["run", "task_id", "server_id", "arrival_time", "completion_time", "response_time"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["run", "policy", "arrival_rate", "et", "std_t", "num_tasks"]);
    }

    #[test]
    fn csv_task_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tasks(&[task_row(0, 1), task_row(1, 0)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tasks.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "0"); // task_id
        assert_eq!(&rows[0][2], "1"); // server_id
        assert_eq!(&rows[1][4], "2.5"); // completion_time
        assert_eq!(&rows[1][5], "1.5"); // response_time
    }

    #[test]
    fn csv_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_summary(&SummaryRow {
            run:          3,
            policy:       "lwl".into(),
            arrival_rate: 0.8,
            et:           2.25,
            std_t:        0.5,
            num_tasks:    100,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "lwl", "0.8", "2.25", "0.5", "100"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use qn_agent::AssignToLeastWorkLeft;
    use qn_core::{Constant, RandomVariable, SimConfig};
    use qn_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, RunInfo, SimOutputObserver};
    use crate::row::{SummaryRow, TaskRow};

    fn constant(v: f64) -> Arc<dyn RandomVariable> {
        Arc::new(Constant::new(v).unwrap())
    }

    fn info(run: u32) -> RunInfo {
        RunInfo { run, policy: "lwl".into(), arrival_rate: 0.5 }
    }

    /// Records rows in memory; optionally fails every summary write.
    #[derive(Default)]
    struct Memory {
        tasks:        Vec<TaskRow>,
        summaries:    Vec<SummaryRow>,
        fail_summary: bool,
    }

    impl OutputWriter for Memory {
        fn write_tasks(&mut self, rows: &[TaskRow]) -> OutputResult<()> {
            self.tasks.extend_from_slice(rows);
            Ok(())
        }

        fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
            if self.fail_summary {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.summaries.push(row.clone());
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    fn run_into<W: OutputWriter>(obs: &mut SimOutputObserver<W>, target: u64) {
        let mut sim = SimBuilder::new(SimConfig::new(2, target, 7), constant(2.0), constant(1.0), |_| {
            Ok(AssignToLeastWorkLeft)
        })
        .build()
        .unwrap();
        sim.run(obs).unwrap();
    }

    #[test]
    fn one_task_row_per_completion() {
        let mut obs = SimOutputObserver::new(Memory::default(), info(0));
        run_into(&mut obs, 20);
        assert!(obs.take_error().is_none());
        let mem = obs.into_writer();
        assert_eq!(mem.tasks.len(), 20);
        assert!(mem.tasks.iter().all(|r| r.response_time == 1.0 && r.run == 0));
        assert_eq!(mem.summaries.len(), 1);
        assert_eq!(mem.summaries[0].et, 1.0);
        assert_eq!(mem.summaries[0].num_tasks, 20);
    }

    #[test]
    fn summary_only_skips_tasks() {
        let mut obs = SimOutputObserver::new(Memory::default(), info(1)).summary_only();
        run_into(&mut obs, 5);
        let mem = obs.into_writer();
        assert!(mem.tasks.is_empty());
        assert_eq!(mem.summaries[0].run, 1);
    }

    #[test]
    fn write_errors_are_stored() {
        let mem = Memory { fail_summary: true, ..Memory::default() };
        let mut obs = SimOutputObserver::new(mem, info(0));
        run_into(&mut obs, 3);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn writer_reused_across_runs() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        for run in 0..2 {
            let mut obs = SimOutputObserver::new(writer, info(run));
            run_into(&mut obs, 1_500);
            assert!(obs.take_error().is_none());
            writer = obs.into_writer();
        }
        writer.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tasks.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3_000);
        let mut rdr = csv::Reader::from_path(dir.path().join("summaries.csv")).unwrap();
        let runs: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(runs, ["0", "1"]);
    }
}
