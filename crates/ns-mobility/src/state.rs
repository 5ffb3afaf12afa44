//! Per-agent movement state.

/// Movement bookkeeping for a single agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementState {
    /// Fractional progress toward the next step.  `f64` so the remainder
    /// survives long runs without rounding drift.
    pub accumulator: f64,

    /// Seconds left on the "just rested" window; steps are free while positive.
    pub rested_secs: f32,

    /// Successful steps taken so far.
    pub steps: u64,
}

impl MovementState {
    #[inline]
    pub fn is_rested(&self) -> bool {
        self.rested_secs > 0.0
    }
}
