//! The `OutputWriter` trait implemented by all backend writers.

use fp_sim::ScheduleResult;

use crate::{OutputResult, PathPointRow, ResultRows, RoadNodeRow, SummaryRow, SupplyEventRow};

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    fn write_paths(&mut self, rows: &[PathPointRow]) -> OutputResult<()>;

    fn write_supply_events(&mut self, rows: &[SupplyEventRow]) -> OutputResult<()>;

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    fn write_road_network(&mut self, rows: &[RoadNodeRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Flatten `result` and write every table.
    fn write_result(&mut self, result: &ScheduleResult) -> OutputResult<()> {
        let rows = ResultRows::from_result(result);
        self.write_paths(&rows.paths)?;
        self.write_supply_events(&rows.supply_events)?;
        self.write_summary(&rows.summary)?;
        self.write_road_network(&rows.road_network)
    }
}
