//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `deliveries` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS deliveries (
                 mail_id           INTEGER PRIMARY KEY,
                 robot_id          INTEGER NOT NULL,
                 arrival_tick      INTEGER NOT NULL,
                 delivered_tick    INTEGER NOT NULL,
                 destination_floor INTEGER NOT NULL,
                 weight            INTEGER NOT NULL,
                 distance          INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick              INTEGER PRIMARY KEY,
                 arrived           INTEGER NOT NULL,
                 delivered         INTEGER NOT NULL,
                 pending           INTEGER NOT NULL,
                 waiting_robots    INTEGER NOT NULL,
                 delivering_robots INTEGER NOT NULL,
                 returning_robots  INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO deliveries \
                 (mail_id, robot_id, arrival_tick, delivered_tick, destination_floor, weight, distance) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.mail_id as i64,
                    row.robot_id,
                    row.arrival_tick as i64,
                    row.delivered_tick as i64,
                    row.destination_floor,
                    row.weight,
                    row.distance,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, arrived, delivered, pending, waiting_robots, delivering_robots, returning_robots) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.arrived as i64,
                row.delivered as i64,
                row.pending as i64,
                row.waiting_robots as i64,
                row.delivering_robots as i64,
                row.returning_robots as i64,
            ],
        )?;
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
