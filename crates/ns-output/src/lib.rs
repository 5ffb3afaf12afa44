//! `ns-output` — CSV output for needsim runs.
//!
//! [`SimOutputObserver`] implements `ns_sim::SimObserver` and forwards
//! snapshot and summary rows to any [`OutputWriter`]. The bundled
//! [`CsvWriter`] creates two files in the output directory:
//!
//! | File                  | One row per                         |
//! |-----------------------|-------------------------------------|
//! | `agent_snapshots.csv` | agent, every `output_interval_ticks` |
//! | `tick_summaries.csv`  | tick                                |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ns_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
