//! The per-tick need system: stat drift, satisfaction cooldowns, health, and
//! the wake-up rule for sleeping agents.

use ns_core::StatKind;
use serde::{Deserialize, Serialize};

use crate::{NeedsConfig, Stats, Tier};

/// Seconds remaining on each stat's "just satisfied" window.  While a
/// cooldown is positive the stat does not drift.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionCooldowns {
    pub hunger: f32,
    pub thirst: f32,
    pub energy: f32,
}

impl SatisfactionCooldowns {
    /// Start the window for `kind`.  Stats without a cooldown are ignored.
    pub fn start(&mut self, kind: StatKind, secs: f32) {
        match kind {
            StatKind::Hunger => self.hunger = secs,
            StatKind::Thirst => self.thirst = secs,
            StatKind::Energy => self.energy = secs,
            StatKind::Health | StatKind::Mood => {}
        }
    }

    #[inline]
    pub fn is_active(&self, kind: StatKind) -> bool {
        match kind {
            StatKind::Hunger => self.hunger > 0.0,
            StatKind::Thirst => self.thirst > 0.0,
            StatKind::Energy => self.energy > 0.0,
            StatKind::Health | StatKind::Mood => false,
        }
    }

    fn tick(&mut self, dt: f32) {
        self.hunger = (self.hunger - dt).max(0.0);
        self.thirst = (self.thirst - dt).max(0.0);
        self.energy = (self.energy - dt).max(0.0);
    }
}

/// Where (and whether) an agent is resting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rest {
    Awake,
    Ground,
    Bed,
}

/// Advance `stats` by `dt` seconds.
pub fn drift(
    stats:     &mut Stats,
    cooldowns: &mut SatisfactionCooldowns,
    rest:      Rest,
    poisoned:  bool,
    dt:        f32,
    cfg:       &NeedsConfig,
) {
    let rates = &cfg.drift;
    let need_factor = if rest == Rest::Awake { 1.0 } else { rates.sleep_need_factor };

    if !cooldowns.is_active(StatKind::Hunger) {
        stats.adjust(StatKind::Hunger, rates.hunger_per_sec * need_factor * dt);
    }
    if !cooldowns.is_active(StatKind::Thirst) {
        stats.adjust(StatKind::Thirst, rates.thirst_per_sec * need_factor * dt);
    }
    match rest {
        Rest::Awake if !cooldowns.is_active(StatKind::Energy) => {
            stats.adjust(StatKind::Energy, -rates.energy_per_sec * dt);
        }
        Rest::Awake  => {}
        Rest::Ground => { stats.adjust(StatKind::Energy, rates.sleep_energy_ground_per_sec * dt); }
        Rest::Bed    => { stats.adjust(StatKind::Energy, rates.sleep_energy_bed_per_sec * dt); }
    }
    stats.adjust(StatKind::Mood, -rates.mood_per_sec * dt);

    let starving = stats.hunger >= 100.0 || stats.thirst >= 100.0;
    let mut damage = 0.0;
    if starving {
        damage += cfg.starvation_damage_per_sec;
    }
    if poisoned {
        damage += cfg.poison_damage_per_sec;
    }
    if damage > 0.0 {
        stats.adjust(StatKind::Health, -damage * dt);
    } else if cfg.max_survival_tier(stats) == Tier::None {
        stats.adjust(StatKind::Health, cfg.health_regen_per_sec * dt);
    }

    cooldowns.tick(dt);
}

/// `true` if a sleeping agent should wake: energy is back at its optimum, or
/// hunger/thirst reached Crisis while energy is above the exhausted floor.
pub fn should_wake(stats: &Stats, cfg: &NeedsConfig) -> bool {
    if stats.at_optimum(StatKind::Energy) {
        return true;
    }
    let urgent = cfg.tier_of(stats, StatKind::Hunger) == Tier::Crisis
        || cfg.tier_of(stats, StatKind::Thirst) == Tier::Crisis;
    urgent && stats.energy > cfg.exhausted_floor
}
