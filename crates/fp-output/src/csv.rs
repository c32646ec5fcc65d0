//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `machine_paths.csv`
//! - `supply_events.csv`
//! - `summary.csv`
//! - `road_network.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PathPointRow, RoadNodeRow, SummaryRow, SupplyEventRow};

/// Writes plan output to four CSV files.
pub struct CsvWriter {
    paths:    Writer<File>,
    supply:   Writer<File>,
    summary:  Writer<File>,
    roads:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the four CSV files and write headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut paths = Writer::from_path(dir.join("machine_paths.csv"))?;
        paths.write_record(["machine_id", "seq", "x", "y", "timestamp", "action"])?;

        let mut supply = Writer::from_path(dir.join("supply_events.csv"))?;
        supply.write_record(["machine_id", "seq", "time", "duration"])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "machines",
            "total_time_hours",
            "efficiency",
            "total_supply_events",
            "total_distance",
            "road_nodes",
            "base_x",
            "base_y",
        ])?;

        let mut roads = Writer::from_path(dir.join("road_network.csv"))?;
        roads.write_record(["node", "x", "y"])?;

        Ok(Self { paths, supply, summary, roads, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_paths(&mut self, rows: &[PathPointRow]) -> OutputResult<()> {
        for row in rows {
            self.paths.write_record(&[
                row.machine_id.to_string(),
                row.seq.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.timestamp.to_string(),
                row.action.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_supply_events(&mut self, rows: &[SupplyEventRow]) -> OutputResult<()> {
        for row in rows {
            self.supply.write_record(&[
                row.machine_id.to_string(),
                row.seq.to_string(),
                row.time.to_string(),
                row.duration.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.machines.to_string(),
            row.total_time_hours.to_string(),
            row.efficiency.to_string(),
            row.total_supply_events.to_string(),
            row.total_distance.to_string(),
            row.road_nodes.to_string(),
            row.base_x.to_string(),
            row.base_y.to_string(),
        ])?;
        Ok(())
    }

    fn write_road_network(&mut self, rows: &[RoadNodeRow]) -> OutputResult<()> {
        for row in rows {
            self.roads.write_record(&[row.node.to_string(), row.x.to_string(), row.y.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.paths.flush()?;
        self.supply.flush()?;
        self.summary.flush()?;
        self.roads.flush()?;
        Ok(())
    }
}
