//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ns_agent::AgentStore;
use ns_behavior::Mind;
use ns_core::Tick;
use ns_sim::{SimObserver, TickSummary};
use tracing::warn;

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to an
/// [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first write error is kept and logged;
/// later writes are skipped. Check [`take_error`][Self::take_error] after
/// `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further rows are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, minds: &[Mind]) {
        if self.last_error.is_some() {
            return;
        }
        let rows: Vec<AgentSnapshotRow> = minds
            .iter()
            .enumerate()
            .take(agents.count)
            .map(|(i, mind)| AgentSnapshotRow::capture(tick, i, agents, mind))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
