//! Read-only simulation state passed to every behavior callback.

use ns_agent::{AgentStore, NetPreference};
use ns_core::{AgentId, Pos, StatKind, Tick};
use ns_needs::{NeedsConfig, Stats, Tier};
use ns_world::SpatialStore;

use crate::{BehaviorConfig, Mind, OrderBoard};

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// Built once per tick by ns-sim and shared immutably across all agents
/// during the decide phase.  ns-sim never allows mutable access to these
/// structures while a `SimContext` is live.
pub struct SimContext<'a> {
    pub tick: Tick,

    /// Simulated seconds per tick.
    pub tick_secs: f32,

    pub agents: &'a AgentStore,

    /// Scheduler state from the end of the previous tick, indexed by `AgentId`.
    pub minds: &'a [Mind],

    pub world:  &'a dyn SpatialStore,
    pub orders: &'a OrderBoard,
    pub scorer: &'a dyn NetPreference,

    pub needs:  &'a NeedsConfig,
    pub config: &'a BehaviorConfig,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn pos(&self, agent: AgentId) -> Pos {
        self.agents.pos[agent.index()]
    }

    #[inline]
    pub fn stats(&self, agent: AgentId) -> &Stats {
        &self.agents.stats[agent.index()]
    }

    #[inline]
    pub fn tier(&self, agent: AgentId, stat: StatKind) -> Tier {
        self.needs.tier_of(self.stats(agent), stat)
    }
}
