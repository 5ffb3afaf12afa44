//! The five continuous stats of one agent.

use ns_core::StatKind;
use serde::{Deserialize, Serialize};

/// Hunger and thirst grow worse upward; energy, health, and mood grow worse
/// downward.  Every value is kept in [0, 100].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub hunger: f32,
    pub thirst: f32,
    pub energy: f32,
    pub health: f32,
    pub mood:   f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self { hunger: 20.0, thirst: 20.0, energy: 90.0, health: 100.0, mood: 70.0 }
    }
}

impl Stats {
    #[inline]
    pub fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Hunger => self.hunger,
            StatKind::Thirst => self.thirst,
            StatKind::Energy => self.energy,
            StatKind::Health => self.health,
            StatKind::Mood   => self.mood,
        }
    }

    #[inline]
    fn slot(&mut self, kind: StatKind) -> &mut f32 {
        match kind {
            StatKind::Hunger => &mut self.hunger,
            StatKind::Thirst => &mut self.thirst,
            StatKind::Energy => &mut self.energy,
            StatKind::Health => &mut self.health,
            StatKind::Mood   => &mut self.mood,
        }
    }

    /// Set `kind` to `value`, clamped to [0, 100].
    pub fn set(&mut self, kind: StatKind, value: f32) {
        *self.slot(kind) = value.clamp(0.0, 100.0);
    }

    /// Add `delta` to `kind` (clamped) and return the new value.
    pub fn adjust(&mut self, kind: StatKind, delta: f32) -> f32 {
        let slot = self.slot(kind);
        *slot = (*slot + delta).clamp(0.0, 100.0);
        *slot
    }

    /// `true` if `kind` sits exactly at its optimum.
    #[inline]
    pub fn at_optimum(&self, kind: StatKind) -> bool {
        self.get(kind) == kind.optimum()
    }
}
