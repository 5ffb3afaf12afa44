//! Terminal effects: what happens to stats, inventory, and the world when a
//! duration-gated action completes.
//!
//! The tick loop only decides *when* to call these.  Every method returns
//! `false` (and changes nothing) when its preconditions no longer hold.

use ns_agent::{AgentStore, Carried, NetPreference};
use ns_core::{AgentId, ItemId, ItemKind, Pos, StatKind, Variety};
use ns_needs::NeedsConfig;
use ns_world::{FeatureKind, SpatialStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Where the food comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Food {
    Carried(usize),
    Ground(ItemId),
}

/// Where the water comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrinkFrom {
    /// The water feature the agent stands on.
    Source,
    /// A full vessel in the given inventory slot.
    Vessel(usize),
}

/// Mutable state an effect may touch.
pub struct EffectCtx<'a> {
    pub agents: &'a mut AgentStore,
    pub world:  &'a mut dyn SpatialStore,
    pub needs:  &'a NeedsConfig,
    pub scorer: &'a dyn NetPreference,
}

/// Effect collaborators called from the serial execution phase.
pub trait Effects: Send + Sync + 'static {
    fn consume(&self, agent: AgentId, food: Food, cx: &mut EffectCtx<'_>) -> bool;
    fn drink(&self, agent: AgentId, from: DrinkFrom, cx: &mut EffectCtx<'_>) -> bool;
    fn start_sleep(&self, agent: AgentId, at_rest_site: bool, cx: &mut EffectCtx<'_>);
    fn pick_up(&self, agent: AgentId, item: ItemId, cx: &mut EffectCtx<'_>) -> bool;
    fn look(&self, agent: AgentId, item: ItemId, cx: &mut EffectCtx<'_>) -> bool;
    fn talk(&self, agent: AgentId, partner: AgentId, cx: &mut EffectCtx<'_>) -> bool;
    fn fill_vessel(&self, agent: AgentId, cx: &mut EffectCtx<'_>) -> bool;
    fn till_soil(&self, agent: AgentId, pos: Pos, cx: &mut EffectCtx<'_>) -> bool;
    fn craft(&self, agent: AgentId, slot: usize, cx: &mut EffectCtx<'_>) -> bool;
}

/// Effect magnitudes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Hunger removed per item eaten.
    pub nutrition: f32,
    /// Mood change per point of net preference for the eaten variety.
    pub preference_mood_per_point: f32,
    /// Thirst removed per drink at a source.
    pub drink_amount: f32,
    /// Thirst removed by emptying a full vessel.
    pub vessel_drink_amount: f32,
    /// Seconds of poisoning from one poisonous item.
    pub poison_secs: f32,
    pub look_mood: f32,
    /// Applied to both participants.
    pub talk_mood: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            nutrition:                 35.0,
            preference_mood_per_point: 3.0,
            drink_amount:              20.0,
            vessel_drink_amount:       40.0,
            poison_secs:               20.0,
            look_mood:                 2.0,
            talk_mood:                 5.0,
        }
    }
}

/// The stock effect set.
#[derive(Clone, Debug, Default)]
pub struct DefaultEffects {
    pub config: EffectsConfig,
}

impl DefaultEffects {
    pub fn new(config: EffectsConfig) -> Self {
        Self { config }
    }

    /// Lower `kind` by `amount`; start its satisfaction cooldown on reaching 0.
    fn relieve(agent: AgentId, kind: StatKind, amount: f32, cx: &mut EffectCtx<'_>) {
        let i = agent.index();
        if cx.agents.stats[i].adjust(kind, -amount) <= 0.0 {
            cx.agents.cooldowns[i].start(kind, cx.needs.satisfaction_cooldown_secs);
            trace!(%agent, stat = kind.as_str(), "satisfied");
        }
    }
}

impl Effects for DefaultEffects {
    fn consume(&self, agent: AgentId, food: Food, cx: &mut EffectCtx<'_>) -> bool {
        let i = agent.index();
        let (variety, poisonous) = match food {
            Food::Carried(slot) => {
                if !cx.agents.inventory[i].get(slot).is_some_and(Carried::is_edible) {
                    return false;
                }
                match cx.agents.inventory[i].take(slot) {
                    Some(c) => (c.variety, c.poisonous),
                    None => return false,
                }
            }
            Food::Ground(id) => {
                let here = cx.agents.pos[i];
                if !cx.world.item(id).is_some_and(|it| it.pos == here && it.variety.kind.is_edible()) {
                    return false;
                }
                match cx.world.remove_item(id) {
                    Some(item) => (item.variety, item.poisonous),
                    None => return false,
                }
            }
        };

        Self::relieve(agent, StatKind::Hunger, self.config.nutrition, cx);
        let score = cx.scorer.net_preference(&cx.agents.preferences[i], variety);
        cx.agents.stats[i].adjust(StatKind::Mood, score as f32 * self.config.preference_mood_per_point);
        cx.agents.knowledge[i].insert(variety);
        if poisonous {
            let status = &mut cx.agents.status[i];
            status.poison_secs = status.poison_secs.max(self.config.poison_secs);
            debug!(%agent, %variety, "poisoned");
        }
        trace!(%agent, %variety, score, "ate");
        true
    }

    fn drink(&self, agent: AgentId, from: DrinkFrom, cx: &mut EffectCtx<'_>) -> bool {
        let i = agent.index();
        let amount = match from {
            DrinkFrom::Source => {
                let here = cx.agents.pos[i];
                if !cx.world.feature_at(here).is_some_and(|f| f.kind == FeatureKind::Water) {
                    return false;
                }
                self.config.drink_amount
            }
            DrinkFrom::Vessel(slot) => match cx.agents.inventory[i].get_mut(slot) {
                Some(c) if c.is_full_vessel() => {
                    c.water = false;
                    self.config.vessel_drink_amount
                }
                _ => return false,
            },
        };
        Self::relieve(agent, StatKind::Thirst, amount, cx);
        true
    }

    fn start_sleep(&self, agent: AgentId, at_rest_site: bool, cx: &mut EffectCtx<'_>) {
        let status = &mut cx.agents.status[agent.index()];
        status.sleeping = true;
        status.at_rest_site = at_rest_site;
        trace!(%agent, at_rest_site, "fell asleep");
    }

    fn pick_up(&self, agent: AgentId, item: ItemId, cx: &mut EffectCtx<'_>) -> bool {
        let i = agent.index();
        let here = cx.agents.pos[i];
        if cx.agents.inventory[i].is_full() || !cx.world.item(item).is_some_and(|it| it.pos == here) {
            return false;
        }
        let Some(item) = cx.world.remove_item(item) else { return false };
        let carried = Carried { variety: item.variety, water: false, poisonous: item.poisonous };
        cx.agents.inventory[i].push(carried)
    }

    fn look(&self, agent: AgentId, item: ItemId, cx: &mut EffectCtx<'_>) -> bool {
        let Some(variety) = cx.world.item(item).map(|it| it.variety) else { return false };
        let i = agent.index();
        cx.agents.knowledge[i].insert(variety);
        cx.agents.stats[i].adjust(StatKind::Mood, self.config.look_mood);
        true
    }

    fn talk(&self, agent: AgentId, partner: AgentId, cx: &mut EffectCtx<'_>) -> bool {
        let agents = &mut *cx.agents;
        if !agents.is_alive(partner)
            || agents.status[partner.index()].sleeping
            || agents.pos[agent.index()].chebyshev(agents.pos[partner.index()]) > 1
        {
            return false;
        }
        agents.stats[agent.index()].adjust(StatKind::Mood, self.config.talk_mood);
        agents.stats[partner.index()].adjust(StatKind::Mood, self.config.talk_mood);
        true
    }

    fn fill_vessel(&self, agent: AgentId, cx: &mut EffectCtx<'_>) -> bool {
        let i = agent.index();
        let here = cx.agents.pos[i];
        if !cx.world.feature_at(here).is_some_and(|f| f.kind == FeatureKind::Water) {
            return false;
        }
        let inventory = &mut cx.agents.inventory[i];
        let Some(slot) = inventory.find(Carried::is_empty_vessel) else { return false };
        match inventory.get_mut(slot) {
            Some(vessel) => {
                vessel.water = true;
                true
            }
            None => false,
        }
    }

    fn till_soil(&self, agent: AgentId, pos: Pos, cx: &mut EffectCtx<'_>) -> bool {
        cx.agents.pos[agent.index()] == pos && cx.world.till(pos)
    }

    fn craft(&self, agent: AgentId, slot: usize, cx: &mut EffectCtx<'_>) -> bool {
        match cx.agents.inventory[agent.index()].get_mut(slot) {
            Some(c) if c.variety.kind == ItemKind::Gourd => {
                *c = Carried::new(Variety::new(ItemKind::Vessel, c.variety.color));
                true
            }
            _ => false,
        }
    }
}
