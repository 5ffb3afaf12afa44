//! `ns-sim` — tick loop orchestrator for the needsim scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Needs    — drift stats, tick poison, mark deaths, wake sleepers.
//!   ② Decide   — BehaviorModel::decide for every living, awake agent
//!                against a read-only SimContext (parallel with `parallel`).
//!   ③ Apply    — store minds; resolve order-board requests in AgentId order.
//!   ④ Execute  — for each agent in AgentId order:
//!                  collapse if spent, re-validate the target,
//!                  Move → accumulator step with collision fallback,
//!                  other actions → accumulate progress, fire the effect.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the world's per-cell maps.                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ns_behavior::NeedsScheduler;
//! use ns_sim::{NoopObserver, ScenarioConfig, SimBuilder};
//!
//! let scenario = ScenarioConfig::from_file("meadow.toml".as_ref())?;
//! let mut sim = SimBuilder::from_scenario(&scenario, NeedsScheduler)?.build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod effects;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{AgentEntry, ItemEntry, OrderEntry, ScenarioConfig, Taste, WorldSpec};
pub use effects::{DefaultEffects, DrinkFrom, EffectCtx, Effects, EffectsConfig, Food};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
