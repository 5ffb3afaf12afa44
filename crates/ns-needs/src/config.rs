//! Need-system configuration: threshold tables, drift rates, health rules.

use ns_core::StatKind;
use serde::{Deserialize, Serialize};

use crate::{NeedsError, NeedsResult, Stats, ThresholdTable, Tier, tier};

/// One threshold table per stat.  Shared read-only by every agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub hunger: ThresholdTable,
    pub thirst: ThresholdTable,
    pub energy: ThresholdTable,
    pub health: ThresholdTable,
    pub mood:   ThresholdTable,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hunger: ThresholdTable::rising(50.0, 65.0, 90.0, 95.0),
            thirst: ThresholdTable::rising(50.0, 65.0, 90.0, 95.0),
            energy: ThresholdTable::falling(50.0, 35.0, 20.0, 10.0),
            health: ThresholdTable::falling(50.0, 35.0, 20.0, 10.0),
            mood:   ThresholdTable::falling(40.0, 25.0, 10.0, 5.0),
        }
    }
}

impl Thresholds {
    #[inline]
    pub fn table(&self, kind: StatKind) -> &ThresholdTable {
        match kind {
            StatKind::Hunger => &self.hunger,
            StatKind::Thirst => &self.thirst,
            StatKind::Energy => &self.energy,
            StatKind::Health => &self.health,
            StatKind::Mood   => &self.mood,
        }
    }
}

/// Per-second stat drift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftRates {
    pub hunger_per_sec: f32,
    pub thirst_per_sec: f32,
    /// Energy lost per second while awake.
    pub energy_per_sec: f32,
    pub mood_per_sec:   f32,
    /// Energy regained per second asleep in a bed.
    pub sleep_energy_bed_per_sec:    f32,
    /// Energy regained per second asleep on open ground.
    pub sleep_energy_ground_per_sec: f32,
    /// Multiplier on hunger/thirst drift while asleep.
    pub sleep_need_factor: f32,
}

impl Default for DriftRates {
    fn default() -> Self {
        Self {
            hunger_per_sec:              0.40,
            thirst_per_sec:              0.60,
            energy_per_sec:              0.30,
            mood_per_sec:                0.05,
            sleep_energy_bed_per_sec:    4.0,
            sleep_energy_ground_per_sec: 2.0,
            sleep_need_factor:           0.5,
        }
    }
}

/// Top-level need-system configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    pub thresholds: Thresholds,
    pub drift:      DriftRates,

    /// Seconds a stat stops drifting after being driven to its optimum.
    pub satisfaction_cooldown_secs: f32,

    /// Energy at or below which an agent may sleep on open ground.
    pub exhausted_floor: f32,
    /// Energy at or below which an agent collapses where it stands.
    pub collapse_floor:  f32,

    /// Health lost per second while hunger or thirst is at 100.
    pub starvation_damage_per_sec: f32,
    /// Health lost per second while poisoned.
    pub poison_damage_per_sec:     f32,
    /// Health regained per second while every survival tier is None.
    pub health_regen_per_sec:      f32,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            thresholds:                 Thresholds::default(),
            drift:                      DriftRates::default(),
            satisfaction_cooldown_secs: 5.0,
            exhausted_floor:            20.0,
            collapse_floor:             0.0,
            starvation_damage_per_sec:  1.0,
            poison_damage_per_sec:      0.5,
            health_regen_per_sec:       0.1,
        }
    }
}

impl NeedsConfig {
    /// Current tier of `kind` for `stats`.
    #[inline]
    pub fn tier_of(&self, stats: &Stats, kind: StatKind) -> Tier {
        tier(stats.get(kind), self.thresholds.table(kind))
    }

    /// Highest tier among the survival stats (thirst, hunger, energy).
    pub fn max_survival_tier(&self, stats: &Stats) -> Tier {
        StatKind::SURVIVAL
            .iter()
            .map(|&k| self.tier_of(stats, k))
            .max()
            .unwrap_or_default()
    }

    /// Stats whose tier differs between `before` and `after`, as
    /// `(stat, old, new)`.
    pub fn crossings(&self, before: &Stats, after: &Stats) -> Vec<(StatKind, Tier, Tier)> {
        StatKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let old = self.tier_of(before, kind);
                let new = self.tier_of(after, kind);
                (old != new).then_some((kind, old, new))
            })
            .collect()
    }

    /// Check that every table points the right way and is strictly ordered.
    pub fn validate(&self) -> NeedsResult<()> {
        for kind in StatKind::ALL {
            let table = self.thresholds.table(kind);
            if table.inverted != kind.is_inverted() {
                return Err(NeedsError::WrongDirection { stat: kind, expected: kind.is_inverted() });
            }
            if !table.is_ordered() {
                return Err(NeedsError::InvalidThresholds {
                    stat:   kind,
                    reason: format!(
                        "mild={} moderate={} severe={} crisis={}",
                        table.mild, table.moderate, table.severe, table.crisis
                    ),
                });
            }
        }
        Ok(())
    }
}
