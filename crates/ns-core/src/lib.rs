//! `ns-core` — foundational types for the `needsim` agent scheduler.
//!
//! This crate is a dependency of every other `ns-*` crate and has no `ns-*`
//! dependencies of its own; externally it needs only `rand` and optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ItemId`, `FeatureId`, `OrderId`           |
//! | [`grid`]        | `Pos`, Chebyshev distance, single-cell stepping       |
//! | [`stat`]        | `StatKind`, the five physiological stats              |
//! | [`variety`]     | `ItemKind`, `Color`, `Variety`                        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng`, one deterministic stream per agent        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod grid;
pub mod ids;
pub mod rng;
pub mod stat;
pub mod time;
pub mod variety;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::Pos;
pub use ids::{AgentId, FeatureId, ItemId, OrderId};
pub use rng::AgentRng;
pub use stat::StatKind;
pub use time::{SimClock, SimConfig, Tick};
pub use variety::{Color, ItemKind, Variety};
