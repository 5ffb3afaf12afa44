//! The `MobilityStore` — per-agent movement state.

use ns_core::AgentId;

use crate::MovementState;

/// Movement state for every agent, indexed by `AgentId`.  Always length
/// `agent_count`.
pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    pub fn new(agent_count: usize) -> Self {
        Self { states: vec![MovementState::default(); agent_count] }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> &MovementState {
        &self.states[agent.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut MovementState {
        &mut self.states[agent.index()]
    }

    /// Start the "just rested" window for `agent` (called on waking).
    pub fn start_rested(&mut self, agent: AgentId, secs: f32) {
        self.states[agent.index()].rested_secs = secs;
    }

    /// Forget partial progress, e.g. when an intent is dropped.
    pub fn reset(&mut self, agent: AgentId) {
        self.states[agent.index()].accumulator = 0.0;
    }

    /// Count every rested window down by `dt` seconds.
    pub fn tick_cooldowns(&mut self, dt: f32) {
        for s in &mut self.states {
            s.rested_secs = (s.rested_secs - dt).max(0.0);
        }
    }
}
