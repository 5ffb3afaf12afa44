//! `Intent`: an agent's current goal plus what it needs to resume it.

use ns_agent::AgentStore;
use ns_core::{AgentId, FeatureId, ItemId, ItemKind, OrderId, Pos, StatKind};
use ns_needs::Tier;
use ns_world::SpatialStore;

/// What an agent is doing this tick.  Closed set; every match on it is
/// exhaustive so a new action has to be handled everywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move,
    Consume,
    Drink,
    Sleep,
    PickUp,
    Talk,
    Look,
    Craft,
    FillVessel,
    TillSoil,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move       => "move",
            ActionKind::Consume    => "consume",
            ActionKind::Drink      => "drink",
            ActionKind::Sleep      => "sleep",
            ActionKind::PickUp     => "pick_up",
            ActionKind::Talk       => "talk",
            ActionKind::Look       => "look",
            ActionKind::Craft      => "craft",
            ActionKind::FillVessel => "fill_vessel",
            ActionKind::TillSoil   => "till_soil",
        }
    }

    /// Performed from a neighbouring cell rather than on the destination.
    #[inline]
    pub fn works_adjacent(self) -> bool {
        matches!(self, ActionKind::Talk | ActionKind::Look)
    }
}

/// Weak reference to the thing an intent acts on.  Re-validated every tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Item(ItemId),
    Feature(FeatureId),
    Agent(AgentId),
    /// Inventory slot of the acting agent.
    Carried(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intent {
    /// Current phase: `Move` while travelling, `goal` once arrived.
    pub action: ActionKind,
    /// Action performed on arrival.
    pub goal:   ActionKind,
    /// Next cell on the way to `dest`.
    pub step:   Pos,
    pub dest:   Pos,
    pub target: Option<Target>,
    /// `None` for idle and order intents.
    pub driving_stat: Option<StatKind>,
    /// Tier of `driving_stat` when the intent was formed.
    pub driving_tier: Tier,
    /// Seconds accumulated toward the goal action's duration.
    pub progress: f32,
    pub order: Option<OrderId>,
}

impl Intent {
    /// Head from `from` toward `dest` and perform `goal` there.
    pub fn toward(goal: ActionKind, from: Pos, dest: Pos, target: Option<Target>) -> Self {
        let mut intent = Self {
            action: ActionKind::Move,
            goal,
            step: from,
            dest,
            target,
            driving_stat: None,
            driving_tier: Tier::None,
            progress: 0.0,
            order: None,
        };
        intent.rederive(from);
        intent
    }

    /// Perform `goal` where the agent stands.
    pub fn in_place(goal: ActionKind, at: Pos, target: Option<Target>) -> Self {
        Self::toward(goal, at, at, target)
    }

    pub fn driven_by(mut self, stat: StatKind, tier: Tier) -> Self {
        self.driving_stat = Some(stat);
        self.driving_tier = tier;
        self
    }

    pub fn for_order(mut self, order: OrderId) -> Self {
        self.order = Some(order);
        self
    }

    /// Formed by the idle selector.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.driving_stat.is_none() && self.order.is_none()
    }

    /// Standing where `goal` can be performed.
    pub fn arrived(&self, from: Pos) -> bool {
        if self.goal.works_adjacent() {
            from.chebyshev(self.dest) <= 1
        } else {
            from == self.dest
        }
    }

    /// Recompute the next step and phase from the agent's position.
    /// Progress is kept only while the phase is unchanged.
    pub fn rederive(&mut self, from: Pos) {
        self.step = from.step_toward(self.dest);
        let phase = if self.arrived(from) { self.goal } else { ActionKind::Move };
        if phase != self.action {
            self.action = phase;
            self.progress = 0.0;
        }
    }

    /// Drinking at a water source: kept until thirst is fully quenched.
    pub fn drinks_at_source(&self) -> bool {
        self.goal == ActionKind::Drink && matches!(self.target, Some(Target::Feature(_)))
    }

    /// Follow a moving conversation partner.
    pub fn track_partner(&mut self, agents: &AgentStore) {
        if let Some(Target::Agent(other)) = self.target {
            if agents.contains(other) {
                self.dest = agents.pos[other.index()];
            }
        }
    }

    /// `true` while the referenced item/feature/agent/slot still exists and is
    /// not claimed by another agent.
    pub fn target_valid(&self, agent: AgentId, agents: &AgentStore, world: &dyn SpatialStore) -> bool {
        let Some(target) = self.target else { return true };
        match target {
            Target::Item(id) => match world.item(id) {
                None => false,
                Some(_) if self.goal == ActionKind::Look => true,
                Some(item) => !world.is_claimed_by_other(item.pos, agent),
            },
            Target::Feature(id) => world.feature(id).is_some_and(|f| {
                world.is_cell_valid(f.pos) && !world.is_claimed_by_other(f.pos, agent)
            }),
            Target::Agent(other) => {
                other != agent
                    && agents.is_alive(other)
                    && !agents.status[other.index()].sleeping
            }
            Target::Carried(slot) => agents.inventory[agent.index()]
                .get(slot)
                .is_some_and(|c| match self.goal {
                    ActionKind::Consume => c.is_edible(),
                    ActionKind::Drink   => c.is_full_vessel(),
                    ActionKind::Craft   => c.variety.kind == ItemKind::Gourd,
                    _ => true,
                }),
        }
    }
}
