//! Intent formation.
//!
//! Per tick, for one agent:
//!
//! 1. Frustrated agents stay inert until `Mind::tick` clears the timer.
//! 2. An existing intent is retained unless its driving need is satisfied or
//!    a more urgent *and fulfillable* need appears.  Retained intents
//!    re-derive their next step; a vanished or claimed target drops the
//!    intent and nothing else happens this tick.
//! 3. Otherwise a fresh intent is formed: survival needs by tier (ties
//!    Thirst > Hunger > Energy), then work orders, then idling.
//! 4. When every builder fails under a Severe-or-worse need the failure
//!    counter grows; at the threshold the agent becomes frustrated.

use std::cmp::Reverse;

use ns_core::{AgentId, AgentRng, StatKind};
use ns_needs::Tier;
use tracing::{debug, trace};

use crate::{builders, idle, orders, probes, ActionKind, Decision, Frustration, Intent, Mind, OrderAction, SimContext, Target};

/// Outcome of checking an existing intent.
enum Review {
    Keep(Intent),
    /// Target gone or taken: no intent this tick.
    Drop,
    /// Satisfied or preempted: form a fresh intent now.
    Reevaluate,
}

pub fn decide(agent: AgentId, mind: &Mind, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Decision {
    let mut mind = mind.clone();

    // Timers run in `Mind::tick`, before the decide phase.
    if mind.frustration.is_frustrated() {
        mind.intent = None;
        mind.relabel();
        return Decision { mind, order: None };
    }

    let previous_order = mind.intent.as_ref().and_then(|i| i.order);

    if let Some(intent) = mind.intent.take() {
        match review(intent, agent, ctx) {
            Review::Keep(intent) => {
                mind.intent = Some(intent);
                mind.relabel();
                return Decision { mind, order: None };
            }
            Review::Drop => {
                mind.relabel();
                return Decision { mind, order: None };
            }
            Review::Reevaluate => {}
        }
    }

    let mut order = form(agent, &mut mind, ctx, rng);

    // A held order whose intent was replaced by something else is paused.
    if let Some(id) = previous_order {
        let still_on_it = mind.intent.as_ref().is_some_and(|i| i.order == Some(id));
        if !still_on_it && order.is_none() {
            order = Some(OrderAction::Pause(id));
        }
    }

    mind.relabel();
    Decision { mind, order }
}

/// Retain-or-reevaluate for an existing intent.
fn review(mut intent: Intent, agent: AgentId, ctx: &SimContext<'_>) -> Review {
    let stats = ctx.stats(agent);

    let satisfied = match intent.driving_stat {
        Some(stat) if intent.drinks_at_source() => stats.at_optimum(stat),
        Some(stat) => ctx.tier(agent, stat) == Tier::None,
        None => false,
    };
    if satisfied {
        trace!(%agent, goal = intent.goal.as_str(), "need satisfied");
        return Review::Reevaluate;
    }

    let preempted = StatKind::SURVIVAL.iter().any(|&stat| {
        Some(stat) != intent.driving_stat
            && ctx.tier(agent, stat) > intent.driving_tier
            && probes::probe(stat, agent, ctx)
    });
    if preempted {
        trace!(%agent, goal = intent.goal.as_str(), "intent preempted");
        return Review::Reevaluate;
    }

    intent.track_partner(ctx.agents);
    if !intent.target_valid(agent, ctx.agents, ctx.world) {
        trace!(%agent, goal = intent.goal.as_str(), "target lost; intent dropped");
        return Review::Drop;
    }
    if let (ActionKind::Talk, Some(Target::Agent(other))) = (intent.goal, intent.target) {
        if !idle::talk_partner_available(agent, other, ctx) {
            trace!(%agent, partner = %other, "talk partner out of reach or busy");
            return Review::Drop;
        }
    }
    intent.rederive(ctx.pos(agent));
    Review::Keep(intent)
}

/// Fresh formation.  Writes the new intent (or none) into `mind` and returns
/// any order-board request.
fn form(agent: AgentId, mind: &mut Mind, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Option<OrderAction> {
    let mut tiers: Vec<(StatKind, Tier)> = StatKind::SURVIVAL
        .iter()
        .map(|&stat| (stat, ctx.tier(agent, stat)))
        .collect();
    let max_tier = tiers.iter().map(|&(_, t)| t).max().unwrap_or_default();

    if max_tier == Tier::None {
        let (intent, order) = orders::next_for(agent, ctx);
        if intent.is_some() {
            mind.intent = intent;
            return order;
        }
        if mind.idle_cooldown <= 0.0 {
            mind.idle_cooldown = ctx.config.idle_cooldown_secs;
            mind.intent = idle::select(agent, ctx, rng);
        }
        return order;
    }

    tiers.retain(|&(_, t)| t > Tier::None);
    tiers.sort_by_key(|&(stat, t)| (Reverse(t), stat.precedence()));

    for (stat, tier) in tiers {
        if let Some(intent) = builders::build(stat, tier, agent, ctx) {
            trace!(%agent, stat = stat.as_str(), tier = tier.as_str(), goal = intent.goal.as_str(), "intent formed");
            mind.failures = 0;
            mind.intent = Some(intent);
            return None;
        }
    }

    if max_tier.is_severe() {
        mind.failures += 1;
        if mind.failures >= ctx.config.frustration_threshold {
            debug!(%agent, failures = mind.failures, "frustrated");
            mind.failures = 0;
            mind.intent = None;
            mind.frustration = Frustration::Frustrated { remaining_secs: ctx.config.frustration_secs };
        }
    }
    None
}
