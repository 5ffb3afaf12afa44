//! The mobility engine: effective speed, accumulator stepping, and collision
//! fallback.

use ns_core::{AgentId, Pos, StatKind};
use ns_needs::{NeedsConfig, Stats};
use ns_world::SpatialStore;
use tracing::{debug, trace};

use crate::{MobilityStore, MovementConfig};

/// What happened to a moving agent this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Accumulator below threshold; no step attempted.
    Waiting,
    Stepped(Pos),
    /// Every candidate cell was taken; half the threshold was refunded.
    Blocked,
}

/// One movement request.
#[derive(Copy, Clone, Debug)]
pub struct StepRequest {
    pub agent: AgentId,
    pub from:  Pos,
    /// Precomputed next cell.
    pub step:  Pos,
    /// Ultimate destination.
    pub goal:  Pos,
    /// Cells per second.
    pub speed: f32,
}

/// Owns every agent's [`MovementState`][crate::MovementState] plus the
/// movement parameters.  Used by ns-sim during the serial execution phase.
pub struct MobilityEngine {
    pub config: MovementConfig,
    pub store:  MobilityStore,
}

impl MobilityEngine {
    pub fn new(config: MovementConfig, agent_count: usize) -> Self {
        Self { config, store: MobilityStore::new(agent_count) }
    }

    /// Base speed scaled down for exhaustion and poisoning.
    pub fn effective_speed(&self, base: f32, stats: &Stats, poisoned: bool, needs: &NeedsConfig) -> f32 {
        let mut speed = base;
        if needs.tier_of(stats, StatKind::Energy).is_severe() {
            speed *= self.config.exhausted_speed_factor;
        }
        if poisoned {
            speed *= self.config.poisoned_speed_factor;
        }
        speed.max(0.0)
    }

    /// Feed the accumulator and, once it reaches the threshold, try one step.
    ///
    /// On success the step's energy cost is charged to `stats` (unless the
    /// agent is freshly rested) and any tier crossing is logged.
    pub fn advance(
        &mut self,
        req:   StepRequest,
        dt:    f32,
        world: &mut dyn SpatialStore,
        stats: &mut Stats,
        needs: &NeedsConfig,
    ) -> StepOutcome {
        let threshold = self.config.step_threshold;
        let state = self.store.get_mut(req.agent);
        state.accumulator += f64::from(req.speed) * f64::from(dt);
        if state.accumulator < threshold {
            return StepOutcome::Waiting;
        }
        state.accumulator -= threshold;

        let Some(to) = try_step(req, world) else {
            state.accumulator += threshold / 2.0;
            trace!(agent = %req.agent, from = %req.from, "step blocked");
            return StepOutcome::Blocked;
        };
        state.steps += 1;

        if !state.is_rested() {
            let before = *stats;
            stats.adjust(StatKind::Energy, -self.config.step_energy_cost);
            for (stat, old, new) in needs.crossings(&before, stats) {
                debug!(agent = %req.agent, stat = stat.as_str(), from = old.as_str(), to = new.as_str(), "tier crossed");
            }
        }
        StepOutcome::Stepped(to)
    }
}

/// Candidate cells in priority order: the planned step, single-axis steps
/// toward the goal, then all neighbours ordered by closeness to the goal.
pub fn candidates(from: Pos, step: Pos, goal: Pos) -> Vec<Pos> {
    let mut neighbours: Vec<Pos> = from.neighbors().collect();
    neighbours.sort_by_key(|&n| (n.chebyshev(goal), n.distance_sq(goal)));

    let mut out: Vec<Pos> = Vec::with_capacity(11);
    for c in std::iter::once(step).chain(from.axis_steps_toward(goal)).chain(neighbours) {
        if c != from && !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// First candidate the world lets the agent into.
fn try_step(req: StepRequest, world: &mut dyn SpatialStore) -> Option<Pos> {
    candidates(req.from, req.step, req.goal)
        .into_iter()
        .find(|&c| world.move_agent_to(req.agent, req.from, c).is_ok())
}
