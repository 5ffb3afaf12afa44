//! Per-need intent builders.
//!
//! Each builder either returns a concrete intent or `None` ("cannot
//! fulfill").  Builders re-derive their target from the world every time;
//! they never trust a probe result.

use ns_agent::Affinity;
use ns_core::{AgentId, ItemId, Pos, StatKind};
use ns_needs::Tier;

use crate::{ActionKind, BehaviorConfig, Intent, SimContext, Target};

/// Dispatch to the builder for `stat`.
pub fn build(stat: StatKind, tier: Tier, agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let intent = match stat {
        StatKind::Thirst => drink(agent, ctx),
        StatKind::Hunger => food(agent, ctx),
        StatKind::Energy => sleep(agent, ctx),
        StatKind::Health | StatKind::Mood => None,
    }?;
    Some(intent.driven_by(stat, tier))
}

// ── Thirst ────────────────────────────────────────────────────────────────────

/// Drink from a carried full vessel, else head for the nearest unclaimed
/// water source.
pub fn drink(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    if let Some(slot) = ctx.agents.inventory[agent.index()].find(|c| c.is_full_vessel()) {
        return Some(Intent::in_place(ActionKind::Drink, pos, Some(Target::Carried(slot))));
    }
    let source = ctx.world.nearest_unclaimed_drink_source(pos, agent)?;
    Some(Intent::toward(ActionKind::Drink, pos, source.pos, Some(Target::Feature(source.id))))
}

// ── Hunger ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
enum FoodSource {
    Carried(usize),
    Ground(ItemId, Pos),
}

/// Nearest candidate per affinity bucket.  Buckets nest: a perfect match also
/// counts as partial and any.
#[derive(Default)]
struct Buckets {
    perfect: Option<(u32, FoodSource)>,
    partial: Option<(u32, FoodSource)>,
    any:     Option<(u32, FoodSource)>,
}

impl Buckets {
    fn offer(&mut self, dist: u32, source: FoodSource, affinity: Affinity) {
        // Strict `<` keeps the earlier candidate on ties: carried first, then id order.
        let closer = |slot: Option<(u32, FoodSource)>| slot.is_none_or(|(d, _)| dist < d);
        if closer(self.any) {
            self.any = Some((dist, source));
        }
        if affinity >= Affinity::Partial && closer(self.partial) {
            self.partial = Some((dist, source));
        }
        if affinity == Affinity::Perfect && closer(self.perfect) {
            self.perfect = Some((dist, source));
        }
    }

    fn pick(self, hunger: f32, cfg: &BehaviorConfig) -> Option<FoodSource> {
        let chosen = if hunger >= cfg.food_any_cutoff {
            self.any
        } else if hunger >= cfg.food_partial_cutoff {
            self.partial.or(self.any)
        } else {
            self.perfect.or(self.partial)
        };
        chosen.map(|(_, source)| source)
    }
}

/// Severity-graded food selection in a single pass over carried and loose
/// edible items.
pub fn food(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    let prefs = &ctx.agents.preferences[agent.index()];
    let mut buckets = Buckets::default();

    for (slot, carried) in ctx.agents.inventory[agent.index()].iter() {
        if carried.is_edible() {
            buckets.offer(0, FoodSource::Carried(slot), prefs.affinity(carried.variety, ctx.scorer));
        }
    }
    for item in ctx.world.items() {
        if !item.variety.kind.is_edible()
            || !ctx.world.is_cell_valid(item.pos)
            || ctx.world.is_claimed_by_other(item.pos, agent)
        {
            continue;
        }
        buckets.offer(
            pos.chebyshev(item.pos),
            FoodSource::Ground(item.id, item.pos),
            prefs.affinity(item.variety, ctx.scorer),
        );
    }

    let intent = match buckets.pick(ctx.stats(agent).hunger, ctx.config)? {
        FoodSource::Carried(slot) => {
            Intent::in_place(ActionKind::Consume, pos, Some(Target::Carried(slot)))
        }
        FoodSource::Ground(id, at) => {
            Intent::toward(ActionKind::Consume, pos, at, Some(Target::Item(id)))
        }
    };
    Some(intent)
}

// ── Energy ────────────────────────────────────────────────────────────────────

/// Head for the nearest unclaimed bed, else lie down on open ground once
/// exhausted.
pub fn sleep(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    if let Some(bed) = ctx.world.nearest_unclaimed_bed(pos, agent) {
        return Some(Intent::toward(ActionKind::Sleep, pos, bed.pos, Some(Target::Feature(bed.id))));
    }
    (ctx.stats(agent).energy <= ctx.needs.exhausted_floor)
        .then(|| Intent::in_place(ActionKind::Sleep, pos, None))
}
