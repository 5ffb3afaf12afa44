//! Idle behavior selector.
//!
//! Runs only when no survival need is urgent, no order applies, and the idle
//! cooldown has expired.  A uniform draw picks a primary activity; if its
//! preconditions fail, the other two are tried in a fixed order.

use ns_core::{AgentId, AgentRng};

use crate::{ActionKind, Intent, SimContext, Target};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdleChoice {
    Look,
    Talk,
    Forage,
    Nothing,
}

impl IdleChoice {
    pub const ALL: [IdleChoice; 4] = [IdleChoice::Look, IdleChoice::Talk, IdleChoice::Forage, IdleChoice::Nothing];

    /// The primary followed by its fallbacks.
    pub fn chain(self) -> &'static [IdleChoice] {
        match self {
            IdleChoice::Look    => &[IdleChoice::Look, IdleChoice::Talk, IdleChoice::Forage],
            IdleChoice::Talk    => &[IdleChoice::Talk, IdleChoice::Look, IdleChoice::Forage],
            IdleChoice::Forage  => &[IdleChoice::Forage, IdleChoice::Look, IdleChoice::Talk],
            IdleChoice::Nothing => &[],
        }
    }
}

/// Draw a primary activity and walk its fallback chain.
///
/// The caller resets the idle cooldown whatever this returns.
pub fn select(agent: AgentId, ctx: &SimContext<'_>, rng: &mut AgentRng) -> Option<Intent> {
    let primary = rng.pick(&IdleChoice::ALL)?;
    select_from(primary, agent, ctx)
}

pub fn select_from(primary: IdleChoice, agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    primary.chain().iter().find_map(|&choice| match choice {
        IdleChoice::Look    => look(agent, ctx),
        IdleChoice::Talk    => talk(agent, ctx),
        IdleChoice::Forage  => forage(agent, ctx),
        IdleChoice::Nothing => None,
    })
}

/// Walk over to an item within look range, unknown varieties first.
pub fn look(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    let known = &ctx.agents.knowledge[agent.index()];
    let radius = ctx.config.look_radius;
    let item = ctx
        .world
        .items()
        .filter(|i| pos.chebyshev(i.pos) <= radius)
        .min_by_key(|i| (known.contains(&i.variety), pos.chebyshev(i.pos), i.id))?;
    Some(Intent::toward(ActionKind::Look, pos, item.pos, Some(Target::Item(item.id))))
}

/// Approach the nearest awake agent that is itself idle.
pub fn talk(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    let pos = ctx.pos(agent);
    let partner = ctx
        .agents
        .schedulable()
        .filter(|&other| other != agent && talk_partner_available(agent, other, ctx))
        .min_by_key(|&other| (pos.chebyshev(ctx.pos(other)), other))?;
    Some(Intent::toward(ActionKind::Talk, pos, ctx.pos(partner), Some(Target::Agent(partner))))
}

/// Whether `other` is within talking range of `agent` and free to chat.
pub fn talk_partner_available(agent: AgentId, other: AgentId, ctx: &SimContext<'_>) -> bool {
    let mind = &ctx.minds[other.index()];
    ctx.pos(agent).chebyshev(ctx.pos(other)) <= ctx.config.talk_radius
        && !mind.frustration.is_frustrated()
        && mind.intent.as_ref().is_none_or(|i| i.is_idle())
}

/// Pick up the nearest edible item in range, if there is room to carry it.
pub fn forage(agent: AgentId, ctx: &SimContext<'_>) -> Option<Intent> {
    if ctx.agents.inventory[agent.index()].is_full() {
        return None;
    }
    let pos = ctx.pos(agent);
    let radius = ctx.config.forage_radius;
    let item = ctx
        .world
        .items()
        .filter(|i| {
            i.variety.kind.is_edible()
                && pos.chebyshev(i.pos) <= radius
                && ctx.world.is_cell_valid(i.pos)
                && !ctx.world.is_claimed_by_other(i.pos, agent)
        })
        .min_by_key(|i| (pos.chebyshev(i.pos), i.id))?;
    Some(Intent::toward(ActionKind::PickUp, pos, item.pos, Some(Target::Item(item.id))))
}
