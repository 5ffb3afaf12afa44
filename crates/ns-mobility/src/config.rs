use serde::{Deserialize, Serialize};

use crate::{MobilityError, MobilityResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Accumulator units consumed per grid step.
    pub step_threshold: f64,
    /// Energy spent per successful step.
    pub step_energy_cost: f32,
    /// Seconds after waking during which steps cost no energy.
    pub rested_cooldown_secs: f32,
    /// Speed multiplier while energy is Severe or worse.
    pub exhausted_speed_factor: f32,
    /// Speed multiplier while poisoned.
    pub poisoned_speed_factor: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_threshold:         1.0,
            step_energy_cost:       0.05,
            rested_cooldown_secs:   10.0,
            exhausted_speed_factor: 0.5,
            poisoned_speed_factor:  0.75,
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> MobilityResult<()> {
        if !(self.step_threshold.is_finite() && self.step_threshold > 0.0) {
            return Err(MobilityError::Config {
                field:  "step_threshold",
                reason: format!("must be positive, got {}", self.step_threshold),
            });
        }
        for (field, factor) in [
            ("exhausted_speed_factor", self.exhausted_speed_factor),
            ("poisoned_speed_factor", self.poisoned_speed_factor),
        ] {
            if !(factor.is_finite() && factor >= 0.0) {
                return Err(MobilityError::Config { field, reason: format!("bad factor {factor}") });
            }
        }
        Ok(())
    }
}
