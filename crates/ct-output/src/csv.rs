//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `car_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::{CarSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("car_snapshots.csv"))?;
        snapshots.write_record(["tick", "car_id", "x", "y", "facing", "dest_x", "dest_y"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "spawned", "arrived", "unreachable", "current", "running"])?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[CarSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let (dest_x, dest_y) = match row.destination {
                Some((x, y)) => (x.to_string(), y.to_string()),
                None => (String::new(), String::new()),
            };
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.car_id.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.facing.to_owned(),
                dest_x,
                dest_y,
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.spawned.to_string(),
            row.arrived.to_string(),
            row.unreachable.to_string(),
            row.current.to_string(),
            (row.running as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
