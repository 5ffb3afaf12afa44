//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNGs live in their own struct so the compute phase can hold `&AgentStore`
//! (shared world snapshot) and `&mut AgentRngs` at the same time.

use std::collections::BTreeSet;

use ns_core::{AgentId, AgentRng, Pos, Variety};
use ns_needs::{SatisfactionCooldowns, Stats};

use crate::{Inventory, Preferences};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

/// Boolean body flags plus the poison timer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Status {
    /// Frozen out of scheduling for good.
    pub dead:         bool,
    pub sleeping:     bool,
    /// Asleep in a bed rather than on open ground.
    pub at_rest_site: bool,
    /// Seconds of poisoning left.
    pub poison_secs:  f32,
}

impl Status {
    #[inline]
    pub fn poisoned(&self) -> bool {
        self.poison_secs > 0.0
    }

    /// Dead and sleeping agents are skipped by intent formation and execution.
    #[inline]
    pub fn is_schedulable(&self) -> bool {
        !self.dead && !self.sleeping
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every agent's body state.
///
/// Every `Vec` field has exactly `count` elements; `AgentId` is the index
/// into all of them.  Agents are never removed, only marked dead.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub pos:         Vec<Pos>,
    pub stats:       Vec<Stats>,
    pub status:      Vec<Status>,
    pub cooldowns:   Vec<SatisfactionCooldowns>,
    /// Cells per second before modifiers.
    pub base_speed:  Vec<f32>,
    pub inventory:   Vec<Inventory>,
    pub preferences: Vec<Preferences>,
    /// Varieties the agent has looked at.
    pub knowledge:   Vec<BTreeSet<Variety>>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.contains(agent) && !self.status[agent.index()].dead
    }

    /// Living agents that are awake.
    pub fn schedulable(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.status[a.index()].is_schedulable())
    }
}
