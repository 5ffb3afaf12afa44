//! Fluent builder for constructing a [`Sim`].

use ns_agent::{AgentRngs, AgentStore, AgentStoreBuilder, NetPreference, SummedPreference};
use ns_behavior::{BehaviorConfig, BehaviorModel, Mind, OrderBoard, OrderKind};
use ns_core::{AgentId, SimConfig};
use ns_mobility::{MobilityEngine, MovementConfig};
use ns_needs::NeedsConfig;
use ns_world::{GridWorld, SpatialStore};

use crate::{DefaultEffects, Effects, ScenarioConfig, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<B, W, E>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, tick duration, …
/// - [`AgentStore`] + [`AgentRngs`] — from [`ns_agent::AgentStoreBuilder`]
/// - `W: SpatialStore` — the world (e.g. [`ns_world::GridWorld`])
/// - `B: BehaviorModel` — the behavior implementation
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                      |
/// |-------------------------|------------------------------|
/// | `.effects(e)`           | `DefaultEffects::default()`  |
/// | `.scorer(s)`            | `SummedPreference`           |
/// | `.needs(c)`             | `NeedsConfig::default()`     |
/// | `.behavior_config(c)`   | `BehaviorConfig::default()`  |
/// | `.movement(c)`          | `MovementConfig::default()`  |
/// | `.orders(v)`            | empty board                  |
/// | `.minds(v)`             | `Mind::new()` per agent      |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(seed).spawn(AgentSpec::at(Pos::new(1, 1))).build();
/// let world = GridWorldBuilder::new(8, 8).water(Pos::new(5, 5)).build()?;
/// let mut sim = SimBuilder::new(config, store, rngs, world, NeedsScheduler)
///     .order(OrderKind::TillSoil(Pos::new(3, 3)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel, W: SpatialStore = GridWorld, E: Effects = DefaultEffects> {
    config:          SimConfig,
    agents:          AgentStore,
    rngs:            AgentRngs,
    world:           W,
    behavior:        B,
    effects:         E,
    scorer:          Option<Box<dyn NetPreference>>,
    needs:           Option<NeedsConfig>,
    behavior_config: Option<BehaviorConfig>,
    movement:        Option<MovementConfig>,
    minds:           Option<Vec<Mind>>,
    orders:          Vec<OrderKind>,
}

impl<B: BehaviorModel, W: SpatialStore> SimBuilder<B, W> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:   SimConfig,
        agents:   AgentStore,
        rngs:     AgentRngs,
        world:    W,
        behavior: B,
    ) -> Self {
        Self {
            config,
            agents,
            rngs,
            world,
            behavior,
            effects:         DefaultEffects::default(),
            scorer:          None,
            needs:           None,
            behavior_config: None,
            movement:        None,
            minds:           None,
            orders:          Vec::new(),
        }
    }
}

impl<B: BehaviorModel> SimBuilder<B> {
    /// Everything from a scenario file: world, agents, orders, and tuning.
    pub fn from_scenario(scenario: &ScenarioConfig, behavior: B) -> SimResult<Self> {
        scenario.validate()?;
        let world = scenario.build_world()?;
        let (agents, rngs) = AgentStoreBuilder::new(scenario.sim.seed)
            .spawn_all(scenario.agent_specs())
            .build();
        Ok(Self::new(scenario.sim.clone(), agents, rngs, world, behavior)
            .effects(DefaultEffects::new(scenario.effects.clone()))
            .needs(scenario.needs.clone())
            .behavior_config(scenario.behavior.clone())
            .movement(scenario.movement.clone())
            .orders(scenario.order_kinds()))
    }
}

impl<B: BehaviorModel, W: SpatialStore, E: Effects> SimBuilder<B, W, E> {
    /// Replace the effect collaborators.
    pub fn effects<E2: Effects>(self, effects: E2) -> SimBuilder<B, W, E2> {
        SimBuilder {
            config:          self.config,
            agents:          self.agents,
            rngs:            self.rngs,
            world:           self.world,
            behavior:        self.behavior,
            effects,
            scorer:          self.scorer,
            needs:           self.needs,
            behavior_config: self.behavior_config,
            movement:        self.movement,
            minds:           self.minds,
            orders:          self.orders,
        }
    }

    pub fn scorer(mut self, scorer: impl NetPreference + 'static) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    pub fn needs(mut self, needs: NeedsConfig) -> Self {
        self.needs = Some(needs);
        self
    }

    pub fn behavior_config(mut self, config: BehaviorConfig) -> Self {
        self.behavior_config = Some(config);
        self
    }

    pub fn movement(mut self, config: MovementConfig) -> Self {
        self.movement = Some(config);
        self
    }

    /// Post one work order.
    pub fn order(mut self, kind: OrderKind) -> Self {
        self.orders.push(kind);
        self
    }

    pub fn orders(mut self, kinds: impl IntoIterator<Item = OrderKind>) -> Self {
        self.orders.extend(kinds);
        self
    }

    /// Supply starting scheduler state (must be length `agent_count`).
    pub fn minds(mut self, minds: Vec<Mind>) -> Self {
        self.minds = Some(minds);
        self
    }

    /// Validate inputs, place agents in the world, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, W, E>> {
        let agent_count = self.agents.count;

        // ── Validate and resolve optional inputs ──────────────────────────
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        let minds = match self.minds {
            Some(m) => {
                if m.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      m.len(),
                        what:     "minds",
                    });
                }
                m
            }
            None => vec![Mind::new(); agent_count],
        };

        let tick = self.config.tick_duration_secs;
        if !(tick.is_finite() && tick > 0.0) {
            return Err(SimError::Config(format!("tick_duration_secs must be positive, got {tick}")));
        }
        let needs = self.needs.unwrap_or_default();
        needs.validate()?;
        let behavior_config = self.behavior_config.unwrap_or_default();
        behavior_config.validate()?;
        let movement = self.movement.unwrap_or_default();
        movement.validate()?;

        // ── Place agents ──────────────────────────────────────────────────
        let mut world = self.world;
        for i in 0..agent_count {
            if !self.agents.status[i].dead {
                world.place_agent(AgentId(i as u32), self.agents.pos[i])?;
            }
        }

        let mut orders = OrderBoard::new();
        for kind in self.orders {
            orders.post(kind);
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            agents:   self.agents,
            rngs:     self.rngs,
            minds,
            world,
            orders,
            mobility: MobilityEngine::new(movement, agent_count),
            behavior: self.behavior,
            effects:  self.effects,
            scorer:   self.scorer.unwrap_or_else(|| Box::new(SummedPreference)),
            needs,
            behavior_config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
