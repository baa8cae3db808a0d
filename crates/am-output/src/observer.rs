//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use am_sim::{DeliveryRecord, SimObserver, SimSummary, TickSummary};

use crate::OutputError;
use crate::row::{DeliveryRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// A [`SimObserver`] that writes deliveries and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Deliveries are buffered for the duration of a tick and written as one
/// batch at tick end.  Errors from the writer are stored internally because
/// `SimObserver` methods have no return value.  After `sim.run()` returns,
/// check for errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    batch:      Vec<DeliveryRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            batch:      Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_delivery(&mut self, record: &DeliveryRecord) {
        self.batch.push(DeliveryRow::from(record));
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if !self.batch.is_empty() {
            let rows = std::mem::take(&mut self.batch);
            let result = self.writer.write_deliveries(&rows);
            self.store_err(result);
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &SimSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
