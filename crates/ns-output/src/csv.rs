//! CSV output backend.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputError, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADERS: [&str; 12] = [
    "agent_id", "tick", "x", "y", "hunger", "thirst", "energy", "health", "mood", "activity",
    "frustrated", "dead",
];

pub const SUMMARY_HEADERS: [&str; 11] = [
    "tick", "alive", "sleeping", "frustrated", "with_intent", "deaths", "collapses", "steps",
    "blocked", "effects", "orders_open",
];

/// Writes simulation output to `agent_snapshots.csv` and `tick_summaries.csv`.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

fn stat(v: f32) -> String {
    format!("{v:.2}")
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                stat(row.hunger),
                stat(row.thirst),
                stat(row.energy),
                stat(row.health),
                stat(row.mood),
                row.activity.to_owned(),
                (row.frustrated as u8).to_string(),
                (row.dead as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.alive.to_string(),
            row.sleeping.to_string(),
            row.frustrated.to_string(),
            row.with_intent.to_string(),
            row.deaths.to_string(),
            row.collapses.to_string(),
            row.steps.to_string(),
            row.blocked.to_string(),
            row.effects.to_string(),
            row.orders_open.to_string(),
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
