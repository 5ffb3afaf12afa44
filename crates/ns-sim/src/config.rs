//! Scenario files: every tuning knob plus the starting world, agents, and
//! work orders, loaded from TOML.
//!
//! All sections are `#[serde(default)]`, so a file only needs the parts it
//! changes:
//!
//! ```toml
//! [sim]
//! total_ticks = 400
//!
//! [world]
//! width  = 12
//! height = 8
//! water  = [{ x = 2, y = 2 }]
//!
//! [[agents]]
//! pos   = { x = 5, y = 5 }
//! likes = [{ kind = "berry", color = "red" }]
//!
//! [[orders]]
//! kind = "till_soil"
//! pos  = { x = 7, y = 3 }
//! ```

use std::path::Path;

use ns_agent::{AgentSpec, Preference, Preferences};
use ns_behavior::{BehaviorConfig, OrderKind};
use ns_core::{Color, ItemKind, Pos, SimConfig, Variety};
use ns_mobility::MovementConfig;
use ns_needs::{NeedsConfig, Stats};
use ns_world::{GridWorld, GridWorldBuilder};
use serde::{Deserialize, Serialize};

use crate::{EffectsConfig, SimError, SimResult};

/// A complete scenario.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim:      SimConfig,
    pub needs:    NeedsConfig,
    pub behavior: BehaviorConfig,
    pub movement: MovementConfig,
    pub effects:  EffectsConfig,
    pub world:    WorldSpec,
    pub agents:   Vec<AgentEntry>,
    pub orders:   Vec<OrderEntry>,
}

/// Grid size, terrain, features, and loose items.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSpec {
    pub width:  i32,
    pub height: i32,
    pub water:  Vec<Pos>,
    pub beds:   Vec<Pos>,
    pub rocks:  Vec<Pos>,
    pub items:  Vec<ItemEntry>,
}

impl Default for WorldSpec {
    fn default() -> Self {
        Self {
            width:  16,
            height: 16,
            water:  Vec::new(),
            beds:   Vec::new(),
            rocks:  Vec::new(),
            items:  Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemEntry {
    pub kind:  ItemKind,
    pub color: Color,
    pub pos:   Pos,
    #[serde(default)]
    pub poisonous: bool,
}

/// One attribute pattern in a like/dislike list.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Taste {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind:  Option<ItemKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentEntry {
    pub pos: Pos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    /// Cells per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub likes: Vec<Taste>,
    #[serde(default)]
    pub dislikes: Vec<Taste>,
}

impl AgentEntry {
    pub fn to_spec(&self) -> AgentSpec {
        let mut spec = AgentSpec::at(self.pos);
        if let Some(stats) = self.stats {
            spec = spec.with_stats(stats);
        }
        if let Some(speed) = self.speed {
            spec = spec.with_speed(speed);
        }
        if let Some(capacity) = self.capacity {
            spec.capacity = capacity;
        }
        let prefs = self
            .likes
            .iter()
            .map(|t| Preference::likes(t.kind, t.color))
            .chain(self.dislikes.iter().map(|t| Preference::dislikes(t.kind, t.color)))
            .collect();
        spec.with_preferences(Preferences(prefs))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderEntry {
    TillSoil { pos: Pos },
    FillVessel,
    CraftVessel,
}

impl From<OrderEntry> for OrderKind {
    fn from(entry: OrderEntry) -> Self {
        match entry {
            OrderEntry::TillSoil { pos } => OrderKind::TillSoil(pos),
            OrderEntry::FillVessel => OrderKind::FillVessel,
            OrderEntry::CraftVessel => OrderKind::CraftVessel,
        }
    }
}

impl ScenarioConfig {
    /// Loads a scenario from a TOML file.
    pub fn from_file(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses a scenario from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SimResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> SimResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every tuning section.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.sim.tick_duration_secs.is_finite() && self.sim.tick_duration_secs > 0.0) {
            return Err(SimError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.sim.tick_duration_secs
            )));
        }
        self.needs.validate()?;
        self.behavior.validate()?;
        self.movement.validate()?;
        Ok(())
    }

    pub fn build_world(&self) -> SimResult<GridWorld> {
        let spec = &self.world;
        let mut b = GridWorldBuilder::new(spec.width, spec.height);
        for &pos in &spec.water {
            b.water(pos);
        }
        for &pos in &spec.beds {
            b.bed(pos);
        }
        for &pos in &spec.rocks {
            b.rock(pos);
        }
        for item in &spec.items {
            let variety = Variety::new(item.kind, item.color);
            if item.poisonous {
                b.poisonous_item(variety, item.pos);
            } else {
                b.item(variety, item.pos);
            }
        }
        Ok(b.build()?)
    }

    pub fn agent_specs(&self) -> Vec<AgentSpec> {
        self.agents.iter().map(AgentEntry::to_spec).collect()
    }

    pub fn order_kinds(&self) -> Vec<OrderKind> {
        self.orders.iter().map(|&o| o.into()).collect()
    }
}
