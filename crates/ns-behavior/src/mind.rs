//! Per-agent scheduler state.

use crate::{ActionKind, Intent};

/// Normal → Frustrated → Normal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Frustration {
    #[default]
    Normal,
    /// Inert until the timer runs out.
    Frustrated { remaining_secs: f32 },
}

impl Frustration {
    #[inline]
    pub fn is_frustrated(&self) -> bool {
        matches!(self, Frustration::Frustrated { .. })
    }
}

/// Everything the scheduler remembers about one agent between ticks.
///
/// The decide phase works on a copy; ns-sim stores the copy back in the
/// apply phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mind {
    pub intent:        Option<Intent>,
    /// Consecutive ticks with a severe need and no fulfillable intent.
    pub failures:      u32,
    pub frustration:   Frustration,
    pub idle_cooldown: f32,
    /// Human-readable activity for observers.
    pub activity:      &'static str,
}

impl Mind {
    pub fn new() -> Self {
        Self { activity: "idle", ..Self::default() }
    }

    /// Run the idle cooldown and frustration timer down by `dt` seconds.
    ///
    /// Called once per tick for every living agent, asleep or not.  Returns
    /// `true` when frustration ends on this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.idle_cooldown = (self.idle_cooldown - dt).max(0.0);
        let Frustration::Frustrated { remaining_secs } = self.frustration else {
            return false;
        };
        let remaining_secs = remaining_secs - dt;
        if remaining_secs > 0.0 {
            self.frustration = Frustration::Frustrated { remaining_secs };
            return false;
        }
        self.frustration = Frustration::Normal;
        true
    }

    /// Derive `activity` from the current intent and frustration state.
    pub fn relabel(&mut self) {
        self.activity = match (&self.frustration, &self.intent) {
            (Frustration::Frustrated { .. }, _) => "frustrated",
            (_, None) => "idle",
            (_, Some(i)) => match (i.action, i.goal) {
                (ActionKind::Move, ActionKind::Drink)      => "going to drink",
                (ActionKind::Move, ActionKind::Consume)    => "going to eat",
                (ActionKind::Move, ActionKind::Sleep)      => "going to bed",
                (ActionKind::Move, ActionKind::PickUp)     => "fetching",
                (ActionKind::Move, ActionKind::Talk)       => "approaching",
                (ActionKind::Move, ActionKind::Look)       => "wandering",
                (ActionKind::Move, _)                      => "working",
                (ActionKind::Drink, _)      => "drinking",
                (ActionKind::Consume, _)    => "eating",
                (ActionKind::Sleep, _)      => "lying down",
                (ActionKind::PickUp, _)     => "picking up",
                (ActionKind::Talk, _)       => "talking",
                (ActionKind::Look, _)       => "looking",
                (ActionKind::Craft, _)      => "crafting",
                (ActionKind::FillVessel, _) => "filling vessel",
                (ActionKind::TillSoil, _)   => "tilling",
            },
        };
    }
}
