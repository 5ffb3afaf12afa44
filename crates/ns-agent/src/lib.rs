//! `ns-agent` — Structure-of-Arrays agent storage for the `needsim` scheduler.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `Status`, `AgentRngs`          |
//! | [`builder`]     | `AgentStoreBuilder`, `AgentSpec`                          |
//! | [`inventory`]   | `Inventory`, `Carried`                                    |
//! | [`preference`]  | `Preference`, `Preferences`, `NetPreference`, `Affinity`  |
//!
//! The store holds the agent's *body*: position, stats, status flags,
//! cooldowns, carried items, and tastes.  The scheduler's per-agent state
//! (current intent, failure counter, frustration) lives in `ns-behavior`.

pub mod builder;
pub mod inventory;
pub mod preference;
pub mod store;


pub use builder::{AgentSpec, AgentStoreBuilder};
pub use inventory::{Carried, Inventory};
pub use preference::{Affinity, NetPreference, Preference, Preferences, SummedPreference};
pub use store::{AgentRngs, AgentStore, Status};
