//! `ns-behavior` — the needs-driven intent scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`intent`]    | `Intent`, `ActionKind`, `Target`                              |
//! | [`mind`]      | `Mind` (per-agent scheduler state), `Frustration`             |
//! | [`context`]   | `SimContext<'a>` — read-only tick snapshot shared by all agents |
//! | [`config`]    | `BehaviorConfig`, `ActionDurations`                           |
//! | [`probes`]    | Fulfillability probes for thirst, hunger, energy              |
//! | [`builders`]  | Per-need intent builders (drink, food, sleep)                 |
//! | [`formation`] | Retain-or-reevaluate, fresh formation, frustration            |
//! | [`idle`]      | Idle selector with fallback chains                            |
//! | [`orders`]    | `OrderBoard`, work orders and their builders                  |
//! | [`model`]     | `BehaviorModel` trait, `Decision`, `NeedsScheduler`           |
//! | [`noop`]      | `NoopBehavior` — never forms intents                          |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! The two-phase tick loop in ns-sim works as follows:
//!
//! 1. **Decide phase** (optionally parallel): for every schedulable agent,
//!    call `BehaviorModel::decide` with a copy of its `Mind`.  All reads go
//!    through `&SimContext`; no mutation.
//!
//! 2. **Apply phase** (sequential): store the returned minds, resolve order
//!    claims in agent order, then execute each intent against the world.
//!
//! Intent formation never fails with an error: an absent intent is the normal
//! outcome when nothing is achievable.

pub mod builders;
pub mod config;
pub mod context;
pub mod error;
pub mod formation;
pub mod idle;
pub mod intent;
pub mod mind;
pub mod model;
pub mod noop;
pub mod orders;
pub mod probes;


pub use config::{ActionDurations, BehaviorConfig};
pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::{ActionKind, Intent, Target};
pub use mind::{Frustration, Mind};
pub use model::{BehaviorModel, Decision, NeedsScheduler};
pub use noop::NoopBehavior;
pub use orders::{Order, OrderAction, OrderBoard, OrderKind, OrderStatus};
