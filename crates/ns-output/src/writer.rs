//! The `OutputWriter` trait implemented by output backends.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for snapshot and summary rows.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles. Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
