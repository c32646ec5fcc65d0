//! `fp-output`: tabular writers for planner results.
//!
//! | Feature   | Backend | Files created                                                        |
//! |-----------|---------|----------------------------------------------------------------------|
//! | *(none)*  | CSV     | `machine_paths.csv`, `supply_events.csv`, `summary.csv`, `road_network.csv` |
//! | `sqlite`  | SQLite  | `schedule.db`                                                        |
//!
//! Both backends implement [`OutputWriter`]; [`OutputWriter::write_result`]
//! flattens a [`ScheduleResult`](fp_sim::ScheduleResult) into
//! [`ResultRows`] and writes every table.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fp_output::{CsvWriter, OutputWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./out"))?;
//! writer.write_result(&result)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{PathPointRow, ResultRows, RoadNodeRow, SummaryRow, SupplyEventRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
