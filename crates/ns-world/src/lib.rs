//! `ns-world` — grid world storage and spatial queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`entity`]  | `Item`, `Feature`, `FeatureKind`                            |
//! | [`store`]   | `SpatialStore` trait — the interface the scheduler consumes |
//! | [`grid`]    | `GridWorld` (occupancy + R-tree), `GridWorldBuilder`        |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the per-cell maps.                   |

pub mod entity;
pub mod error;
pub mod grid;
pub mod store;


pub use entity::{Feature, FeatureKind, Item};
pub use error::{WorldError, WorldResult};
pub use grid::{GridWorld, GridWorldBuilder};
pub use store::SpatialStore;
