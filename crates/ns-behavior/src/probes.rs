//! Fulfillability probes.
//!
//! Cheap existence checks used only to decide whether a more urgent need may
//! preempt the current intent.  A positive probe does not promise that the
//! builder will succeed.

use ns_agent::Affinity;
use ns_core::{AgentId, StatKind};

use crate::{BehaviorConfig, SimContext};

/// `true` if `stat` currently looks satisfiable for `agent`.
pub fn probe(stat: StatKind, agent: AgentId, ctx: &SimContext<'_>) -> bool {
    match stat {
        StatKind::Thirst => thirst(agent, ctx),
        StatKind::Hunger => hunger(agent, ctx),
        StatKind::Energy => energy(agent, ctx),
        StatKind::Health | StatKind::Mood => false,
    }
}

/// A carried full vessel, or a reachable unclaimed water source.
pub fn thirst(agent: AgentId, ctx: &SimContext<'_>) -> bool {
    ctx.agents.inventory[agent.index()].find(|c| c.is_full_vessel()).is_some()
        || ctx.world.nearest_unclaimed_drink_source(ctx.pos(agent), agent).is_some()
}

/// Some carried or reachable edible item passes the hunger-graded rule.
pub fn hunger(agent: AgentId, ctx: &SimContext<'_>) -> bool {
    let hunger = ctx.stats(agent).hunger;
    let prefs = &ctx.agents.preferences[agent.index()];
    let accepts = |v| acceptable(hunger, prefs.affinity(v, ctx.scorer), ctx.config);

    let carried = ctx.agents.inventory[agent.index()]
        .iter()
        .any(|(_, c)| c.is_edible() && accepts(c.variety));
    carried
        || ctx.world.items().any(|item| {
            item.variety.kind.is_edible()
                && ctx.world.is_cell_valid(item.pos)
                && !ctx.world.is_claimed_by_other(item.pos, agent)
                && accepts(item.variety)
        })
}

/// Tired enough for open ground, or a reachable unclaimed bed.
pub fn energy(agent: AgentId, ctx: &SimContext<'_>) -> bool {
    ctx.stats(agent).energy <= ctx.needs.exhausted_floor
        || ctx.world.nearest_unclaimed_bed(ctx.pos(agent), agent).is_some()
}

/// Severity-graded food eligibility.
///
/// ```text
/// hunger ≥ any cutoff      → anything edible
/// hunger ≥ partial cutoff  → partial or perfect match (any as fallback)
/// otherwise                → perfect, else partial; never disliked food
/// ```
pub fn acceptable(hunger: f32, affinity: Affinity, cfg: &BehaviorConfig) -> bool {
    if hunger >= cfg.food_partial_cutoff {
        true
    } else {
        affinity >= Affinity::Partial
    }
}
