//! `ns-mobility` — grid movement driven by a speed accumulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`state`]   | `MovementState` — per-agent accumulator and rested timer     |
//! | [`store`]   | `MobilityStore` — `Vec<MovementState>` indexed by `AgentId`  |
//! | [`config`]  | `MovementConfig`                                             |
//! | [`engine`]  | `MobilityEngine` — effective speed, stepping, collision fallback |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                         |
//!
//! # Movement model
//!
//! Speed is continuous (cells per second) but the grid is discrete:
//!
//! 1. Every tick, `accumulator += effective_speed × tick_secs`.
//! 2. Once the accumulator reaches `step_threshold`, the threshold is
//!    consumed and exactly one step is attempted.
//! 3. If the planned cell is taken, alternates are tried: the single-axis
//!    steps toward the goal, then all eight neighbours closest-first.
//! 4. If nothing is free, half the threshold is refunded so the agent is
//!    not stalled for a full extra tick.
//!
//! The fractional remainder is never discarded, so over many ticks the step
//! count equals `⌊Σ speed·dt / threshold⌋` exactly.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use config::MovementConfig;
pub use engine::{MobilityEngine, StepOutcome, StepRequest, candidates};
pub use error::{MobilityError, MobilityResult};
pub use state::MovementState;
pub use store::MobilityStore;
