//! `ns-needs` — stats, urgency tiers, and the need-drift system.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`tier`]     | `Tier`, `ThresholdTable`, the `tier()` classifier          |
//! | [`stats`]    | `Stats` — the five continuous stats of one agent           |
//! | [`config`]   | `NeedsConfig`, `Thresholds`, `DriftRates`                  |
//! | [`drift`]    | `SatisfactionCooldowns`, `Rest`, per-tick drift and wake rules |
//! | [`error`]    | `NeedsError`, `NeedsResult<T>`                             |
//!
//! # Tier model (summary)
//!
//! ```text
//! non-inverted (hunger, thirst):   value >= crisis → Crisis, >= severe → Severe, …
//! inverted (energy, health, mood): value <= crisis → Crisis, <= severe → Severe, …
//! ```
//!
//! Tiers are always derived from the current value, never stored.

pub mod config;
pub mod drift;
pub mod error;
pub mod stats;
pub mod tier;


pub use config::{DriftRates, NeedsConfig, Thresholds};
pub use drift::{Rest, SatisfactionCooldowns, drift, should_wake};
pub use error::{NeedsError, NeedsResult};
pub use stats::Stats;
pub use tier::{ThresholdTable, Tier, tier};
