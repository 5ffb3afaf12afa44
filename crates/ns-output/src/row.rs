//! Plain data row types written by output backends.

use ns_agent::AgentStore;
use ns_behavior::Mind;
use ns_core::Tick;
use ns_sim::TickSummary;

/// One agent's body and scheduler state at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:   u32,
    pub tick:       u64,
    pub x:          i32,
    pub y:          i32,
    pub hunger:     f32,
    pub thirst:     f32,
    pub energy:     f32,
    pub health:     f32,
    pub mood:       f32,
    pub activity:   &'static str,
    pub frustrated: bool,
    pub dead:       bool,
}

impl AgentSnapshotRow {
    /// Build the row for agent index `i`.
    pub fn capture(tick: Tick, i: usize, agents: &AgentStore, mind: &Mind) -> Self {
        let pos = agents.pos[i];
        let stats = &agents.stats[i];
        Self {
            agent_id:   i as u32,
            tick:       tick.0,
            x:          pos.x,
            y:          pos.y,
            hunger:     stats.hunger,
            thirst:     stats.thirst,
            energy:     stats.energy,
            health:     stats.health,
            mood:       stats.mood,
            activity:   mind.activity,
            frustrated: mind.frustration.is_frustrated(),
            dead:       agents.status[i].dead,
        }
    }
}

/// Aggregate counters for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub alive:       u64,
    pub sleeping:    u64,
    pub frustrated:  u64,
    pub with_intent: u64,
    pub deaths:      u64,
    pub collapses:   u64,
    pub steps:       u64,
    pub blocked:     u64,
    pub effects:     u64,
    pub orders_open: u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:        s.tick.0,
            alive:       s.alive as u64,
            sleeping:    s.sleeping as u64,
            frustrated:  s.frustrated as u64,
            with_intent: s.with_intent as u64,
            deaths:      s.deaths as u64,
            collapses:   s.collapses as u64,
            steps:       s.steps as u64,
            blocked:     s.blocked as u64,
            effects:     s.effects as u64,
            orders_open: s.orders_open as u64,
        }
    }
}
