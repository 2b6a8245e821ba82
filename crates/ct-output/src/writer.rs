//! The `OutputWriter` trait implemented by backend writers.

use crate::{CarSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for simulation output rows.
///
/// The observer stores errors instead of propagating them; retrieve them
/// with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of car snapshots.
    fn write_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
