//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `deliveries.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, TickSummaryRow};

pub(crate) const DELIVERY_HEADER: [&str; 7] = [
    "mail_id",
    "robot_id",
    "arrival_tick",
    "delivered_tick",
    "destination_floor",
    "weight",
    "distance",
];

pub(crate) const SUMMARY_HEADER: [&str; 7] = [
    "tick",
    "arrived",
    "delivered",
    "pending",
    "waiting_robots",
    "delivering_robots",
    "returning_robots",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    deliveries: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut deliveries = Writer::from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record(DELIVERY_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            deliveries,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()> {
        for row in rows {
            self.deliveries.write_record(&[
                row.mail_id.to_string(),
                row.robot_id.to_string(),
                row.arrival_tick.to_string(),
                row.delivered_tick.to_string(),
                row.destination_floor.to_string(),
                row.weight.to_string(),
                row.distance.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.arrived.to_string(),
            row.delivered.to_string(),
            row.pending.to_string(),
            row.waiting_robots.to_string(),
            row.delivering_robots.to_string(),
            row.returning_robots.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
