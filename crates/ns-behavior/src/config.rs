//! Scheduler tuning knobs.

use serde::{Deserialize, Serialize};

use crate::{ActionKind, BehaviorError, BehaviorResult};

/// Seconds each stationary action takes before its effect fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDurations {
    pub consume:     f32,
    pub drink:       f32,
    pub sleep:       f32,
    pub pick_up:     f32,
    pub look:        f32,
    pub talk:        f32,
    pub fill_vessel: f32,
    pub till_soil:   f32,
    pub craft:       f32,
}

impl Default for ActionDurations {
    fn default() -> Self {
        Self {
            consume:     1.5,
            drink:       1.0,
            sleep:       1.0,
            pick_up:     0.5,
            look:        2.0,
            talk:        3.0,
            fill_vessel: 1.0,
            till_soil:   3.0,
            craft:       4.0,
        }
    }
}

impl ActionDurations {
    /// Duration for `action`; `Move` is gated by speed, not time, and has none.
    pub fn of(&self, action: ActionKind) -> Option<f32> {
        match action {
            ActionKind::Move       => None,
            ActionKind::Consume    => Some(self.consume),
            ActionKind::Drink      => Some(self.drink),
            ActionKind::Sleep      => Some(self.sleep),
            ActionKind::PickUp     => Some(self.pick_up),
            ActionKind::Look       => Some(self.look),
            ActionKind::Talk       => Some(self.talk),
            ActionKind::FillVessel => Some(self.fill_vessel),
            ActionKind::TillSoil   => Some(self.till_soil),
            ActionKind::Craft      => Some(self.craft),
        }
    }

    fn all(&self) -> [(&'static str, f32); 9] {
        [
            ("consume", self.consume),
            ("drink", self.drink),
            ("sleep", self.sleep),
            ("pick_up", self.pick_up),
            ("look", self.look),
            ("talk", self.talk),
            ("fill_vessel", self.fill_vessel),
            ("till_soil", self.till_soil),
            ("craft", self.craft),
        ]
    }
}

/// Intent-formation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Hunger at or above which any liked-through-one-attribute food is fine.
    pub food_partial_cutoff: f32,
    /// Hunger at or above which any edible food is fine.
    pub food_any_cutoff:     f32,

    /// Consecutive severe failures before an agent becomes frustrated.
    pub frustration_threshold: u32,
    pub frustration_secs:      f32,

    pub idle_cooldown_secs: f32,
    pub look_radius:        u32,
    pub talk_radius:        u32,
    pub forage_radius:      u32,

    pub durations: ActionDurations,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            food_partial_cutoff:   75.0,
            food_any_cutoff:       90.0,
            frustration_threshold: 10,
            frustration_secs:      15.0,
            idle_cooldown_secs:    4.0,
            look_radius:           5,
            talk_radius:           6,
            forage_radius:         10,
            durations:             ActionDurations::default(),
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !(self.food_partial_cutoff < self.food_any_cutoff && self.food_any_cutoff <= 100.0) {
            return Err(BehaviorError::Config {
                field:  "food_any_cutoff",
                reason: format!(
                    "expected partial ({}) < any ({}) <= 100",
                    self.food_partial_cutoff, self.food_any_cutoff
                ),
            });
        }
        if self.frustration_threshold == 0 {
            return Err(BehaviorError::Config {
                field:  "frustration_threshold",
                reason: "must be at least 1".into(),
            });
        }
        for (field, secs) in self.durations.all() {
            if !secs.is_finite() || secs < 0.0 {
                return Err(BehaviorError::Config { field, reason: format!("bad duration {secs}") });
            }
        }
        if self.frustration_secs < 0.0 || self.idle_cooldown_secs < 0.0 {
            return Err(BehaviorError::Config {
                field:  "frustration_secs",
                reason: "timers must be non-negative".into(),
            });
        }
        Ok(())
    }
}
