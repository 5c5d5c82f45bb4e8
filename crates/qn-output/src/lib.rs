//! `qn-output` — simulation output writers for the rust_qn simulator.
//!
//! | Backend | Files created                   |
//! |---------|---------------------------------|
//! | CSV     | `tasks.csv`, `summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `qn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qn_output::{CsvWriter, OutputWriter, RunInfo, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let info = RunInfo { run: 0, policy: "lwl".into(), arrival_rate: 1.6 };
//! let mut obs = SimOutputObserver::new(writer, info);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { return Err(e.into()); }
//! obs.into_writer().finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{RunInfo, SummaryRow, TaskRow};
pub use writer::OutputWriter;
