//! Simulation observer trait for progress reporting and data collection.

use ns_agent::AgentStore;
use ns_behavior::Mind;
use ns_core::Tick;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:        Tick,
    pub alive:       usize,
    pub sleeping:    usize,
    pub frustrated:  usize,
    /// Agents ending the tick with an intent.
    pub with_intent: usize,
    pub deaths:      usize,
    pub collapses:   usize,
    pub steps:       usize,
    /// Step attempts where every candidate cell was taken.
    pub blocked:     usize,
    /// Terminal effects that fired this tick.
    pub effects:     usize,
    pub orders_open: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — death counter
///
/// ```rust,ignore
/// struct Deaths(usize);
///
/// impl SimObserver for Deaths {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         self.0 += summary.deaths;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to agent bodies and scheduler state so that
    /// output writers can record a snapshot without the sim needing to know
    /// about any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _minds: &[Mind]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
