//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use log::warn;

use ct_agent::CarState;
use ct_core::Tick;
use ct_sim::{Metrics, SimObserver};

use crate::row::{CarSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes car snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output writer failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &Metrics) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(metrics));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, cars: &[CarState]) {
        if cars.is_empty() {
            return;
        }
        let rows: Vec<CarSnapshotRow> =
            cars.iter().map(|car| CarSnapshotRow::from_state(tick, car)).collect();
        let result = self.writer.write_snapshots(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
