//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! ```rust
//! use ns_agent::{AgentSpec, AgentStoreBuilder};
//! use ns_core::Pos;
//!
//! let (store, rngs) = AgentStoreBuilder::new(42)
//!     .spawn(AgentSpec::at(Pos::new(1, 1)))
//!     .spawn(AgentSpec::at(Pos::new(4, 2)))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use std::collections::BTreeSet;

use ns_core::Pos;
use ns_needs::{SatisfactionCooldowns, Stats};

use crate::{AgentRngs, AgentStore, Inventory, Preferences, Status};

/// Starting state for one agent.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    pub pos:         Pos,
    pub stats:       Stats,
    pub base_speed:  f32,
    pub capacity:    usize,
    pub preferences: Preferences,
}

impl AgentSpec {
    /// Default stats and tastes at `pos`.
    pub fn at(pos: Pos) -> Self {
        Self {
            pos,
            stats:       Stats::default(),
            base_speed:  2.0,
            capacity:    2,
            preferences: Preferences::default(),
        }
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_speed(mut self, base_speed: f32) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    seed:  u64,
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, specs: Vec::new() }
    }

    /// Append one agent; its `AgentId` is its spawn order.
    pub fn spawn(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn spawn_all(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let count = self.specs.len();
        let mut store = AgentStore {
            count,
            pos:         Vec::with_capacity(count),
            stats:       Vec::with_capacity(count),
            status:      vec![Status::default(); count],
            cooldowns:   vec![SatisfactionCooldowns::default(); count],
            base_speed:  Vec::with_capacity(count),
            inventory:   Vec::with_capacity(count),
            preferences: Vec::with_capacity(count),
            knowledge:   vec![BTreeSet::new(); count],
        };
        for spec in self.specs {
            store.pos.push(spec.pos);
            store.stats.push(spec.stats);
            store.base_speed.push(spec.base_speed);
            store.inventory.push(Inventory::with_capacity(spec.capacity));
            store.preferences.push(spec.preferences);
        }
        let rngs = AgentRngs::new(count, self.seed);
        (store, rngs)
    }
}
