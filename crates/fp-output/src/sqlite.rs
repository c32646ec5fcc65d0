//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `schedule.db` file in the configured output directory
//! with four tables: `machine_paths`, `supply_events`, `summary` and
//! `road_network`.  The tables hold one plan; opening a writer on an
//! existing database drops and recreates them.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, PathPointRow, RoadNodeRow, SummaryRow, SupplyEventRow};

/// Writes plan output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `schedule.db` in `dir` and reset the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("schedule.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS machine_paths;
             DROP TABLE IF EXISTS supply_events;
             DROP TABLE IF EXISTS summary;
             DROP TABLE IF EXISTS road_network;
             CREATE TABLE machine_paths (
                 machine_id INTEGER NOT NULL,
                 seq        INTEGER NOT NULL,
                 x          REAL    NOT NULL,
                 y          REAL    NOT NULL,
                 timestamp  REAL    NOT NULL,
                 action     TEXT    NOT NULL,
                 PRIMARY KEY (machine_id, seq)
             );
             CREATE TABLE supply_events (
                 machine_id INTEGER NOT NULL,
                 seq        INTEGER NOT NULL,
                 time       REAL    NOT NULL,
                 duration   REAL    NOT NULL,
                 PRIMARY KEY (machine_id, seq)
             );
             CREATE TABLE summary (
                 machines            INTEGER NOT NULL,
                 total_time_hours    REAL    NOT NULL,
                 efficiency          REAL    NOT NULL,
                 total_supply_events INTEGER NOT NULL,
                 total_distance      REAL    NOT NULL,
                 road_nodes          INTEGER NOT NULL,
                 base_x              REAL    NOT NULL,
                 base_y              REAL    NOT NULL
             );
             CREATE TABLE road_network (
                 node INTEGER PRIMARY KEY,
                 x    REAL NOT NULL,
                 y    REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_paths(&mut self, rows: &[PathPointRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO machine_paths (machine_id, seq, x, y, timestamp, action) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.machine_id, row.seq, row.x, row.y, row.timestamp, row.action])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_supply_events(&mut self, rows: &[SupplyEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO supply_events (machine_id, seq, time, duration) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.machine_id, row.seq, row.time, row.duration])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO summary \
             (machines, total_time_hours, efficiency, total_supply_events, total_distance, road_nodes, base_x, base_y) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.machines,
                row.total_time_hours,
                row.efficiency,
                row.total_supply_events,
                row.total_distance,
                row.road_nodes,
                row.base_x,
                row.base_y,
            ],
        )?;
        Ok(())
    }

    fn write_road_network(&mut self, rows: &[RoadNodeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO road_network (node, x, y) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.node, row.x, row.y])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
