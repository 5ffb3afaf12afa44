//! The `Sim` struct and its tick loop.

use ns_agent::{AgentRngs, AgentStore, NetPreference};
use ns_behavior::{ActionKind, BehaviorConfig, BehaviorModel, Decision, Intent, Mind, OrderBoard, SimContext, Target};
use ns_core::{AgentId, OrderId, SimClock, SimConfig, StatKind, Tick};
use ns_mobility::{MobilityEngine, StepOutcome, StepRequest};
use ns_needs::{NeedsConfig, Rest, drift, should_wake};
use ns_world::{FeatureKind, GridWorld, SpatialStore};
use tracing::{debug, info, trace};

use crate::{DefaultEffects, DrinkFrom, EffectCtx, Effects, Food, SimObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Sim<B, W, E>` holds all simulation state and drives the tick loop:
///
/// 1. **Needs** (sequential): drift every living agent's stats, run the
///    poison and mind timers, handle death, and wake sleepers whose rules
///    say so.
/// 2. **Decide** (optionally parallel with the `parallel` feature): call
///    [`BehaviorModel::decide`] for every living, awake agent against a
///    read-only [`SimContext`].
/// 3. **Apply** (sequential, ascending `AgentId`): store the returned minds
///    and resolve order-board requests.  A lost `Take` drops the intent.
/// 4. **Execute** (sequential, ascending `AgentId`): collapse spent agents,
///    re-validate targets, step movers, and fire completed actions.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel, W: SpatialStore = GridWorld, E: Effects = DefaultEffects> {
    pub config: SimConfig,
    pub clock:  SimClock,

    /// Agent bodies (SoA arrays).  Behavior models read this through
    /// `SimContext`.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Scheduler state, indexed by `AgentId`.
    pub minds: Vec<Mind>,

    pub world:    W,
    pub orders:   OrderBoard,
    pub mobility: MobilityEngine,

    pub behavior: B,
    pub effects:  E,
    pub scorer:   Box<dyn NetPreference>,

    pub needs:           NeedsConfig,
    pub behavior_config: BehaviorConfig,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<B: BehaviorModel, W: SpatialStore, E: Effects> Sim<B, W, E> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(agents = self.agents.count, end = %self.config.end_tick(), "simulation started");
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, alive = self.alive_count(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    pub fn alive_count(&self) -> usize {
        self.agents.status.iter().filter(|s| !s.dead).count()
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents, &self.minds);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };

        self.update_needs(&mut summary)?;

        let decisions = self.compute_decisions(now);
        self.apply_decisions(decisions)?;

        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            if !self.agents.status[i].is_schedulable() {
                continue;
            }
            if self.collapse_if_spent(agent)? {
                summary.collapses += 1;
                continue;
            }
            let Some(intent) = self.minds[i].intent.take() else { continue };
            let kept = self.execute(agent, intent, &mut summary)?;
            let mind = &mut self.minds[i];
            mind.intent = kept;
            mind.relabel();
            if self.agents.status[i].sleeping {
                mind.activity = "sleeping";
            }
        }

        for (status, mind) in self.agents.status.iter().zip(&self.minds) {
            if status.dead {
                continue;
            }
            summary.alive += 1;
            summary.sleeping += usize::from(status.sleeping);
            summary.frustrated += usize::from(mind.frustration.is_frustrated());
            summary.with_intent += usize::from(mind.intent.is_some());
        }
        summary.orders_open = self.orders.open_count();
        Ok(summary)
    }

    /// Phase 1: drift, poison, mind timers, death, and waking.
    fn update_needs(&mut self, summary: &mut TickSummary) -> SimResult<()> {
        let dt = self.config.tick_duration_secs;
        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);
            let status = self.agents.status[i];
            if status.dead {
                continue;
            }
            let rest = match (status.sleeping, status.at_rest_site) {
                (false, _) => Rest::Awake,
                (true, true) => Rest::Bed,
                (true, false) => Rest::Ground,
            };

            let before = self.agents.stats[i];
            drift(
                &mut self.agents.stats[i],
                &mut self.agents.cooldowns[i],
                rest,
                status.poisoned(),
                dt,
                &self.needs,
            );
            let poison = &mut self.agents.status[i].poison_secs;
            *poison = (*poison - dt).max(0.0);
            if self.minds[i].tick(dt) {
                debug!(%agent, "frustration over");
            }

            for (stat, old, new) in self.needs.crossings(&before, &self.agents.stats[i]) {
                debug!(%agent, stat = stat.as_str(), from = old.as_str(), to = new.as_str(), "tier crossed");
            }

            if self.agents.stats[i].health <= 0.0 {
                self.kill(agent)?;
                summary.deaths += 1;
            } else if status.sleeping && should_wake(&self.agents.stats[i], &self.needs) {
                self.wake(agent);
            }
        }
        self.mobility.store.tick_cooldowns(dt);
        Ok(())
    }

    fn kill(&mut self, agent: AgentId) -> SimResult<()> {
        let i = agent.index();
        let pos = self.agents.pos[i];
        let status = &mut self.agents.status[i];
        status.dead = true;
        status.sleeping = false;

        let held: Vec<OrderId> = self
            .orders
            .iter()
            .filter(|o| o.status.holder() == Some(agent))
            .map(|o| o.id)
            .collect();
        for id in held {
            self.orders.abandon(id, agent)?;
        }

        self.minds[i] = Mind { activity: "dead", ..Mind::new() };
        self.world.vacate(agent, pos);
        self.mobility.store.reset(agent);
        info!(%agent, %pos, "agent died");
        Ok(())
    }

    fn wake(&mut self, agent: AgentId) {
        let i = agent.index();
        let status = &mut self.agents.status[i];
        status.sleeping = false;
        status.at_rest_site = false;
        self.agents.cooldowns[i].start(StatKind::Energy, self.needs.satisfaction_cooldown_secs);
        self.mobility.store.start_rested(agent, self.mobility.config.rested_cooldown_secs);
        self.minds[i].relabel();
        debug!(%agent, energy = self.agents.stats[i].energy, "woke up");
    }

    /// Phase 2: one decision per schedulable agent, in `AgentId` order.
    fn compute_decisions(&mut self, now: Tick) -> Vec<(AgentId, Decision)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents   = &self.agents;
        let minds    = self.minds.as_slice();
        let behavior = &self.behavior;
        let rngs     = &mut self.rngs;

        let ctx = SimContext {
            tick:      now,
            tick_secs: self.config.tick_duration_secs,
            agents,
            minds,
            world:     &self.world,
            orders:    &self.orders,
            scorer:    &*self.scorer,
            needs:     &self.needs,
            config:    &self.behavior_config,
        };

        #[cfg(not(feature = "parallel"))]
        {
            rngs.inner
                .iter_mut()
                .enumerate()
                .filter(|(i, _)| agents.status[*i].is_schedulable())
                .map(|(i, rng)| {
                    let agent = AgentId(i as u32);
                    (agent, behavior.decide(agent, &minds[i], &ctx, rng))
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each agent owns its RNG slot, so the mutable borrows are disjoint.
            let mut decide = || {
                rngs.inner
                    .par_iter_mut()
                    .enumerate()
                    .filter(|(i, _)| agents.status[*i].is_schedulable())
                    .map(|(i, rng)| {
                        let agent = AgentId(i as u32);
                        (agent, behavior.decide(agent, &minds[i], &ctx, rng))
                    })
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(decide),
                None => decide(),
            }
        }
    }

    /// Phase 3: store minds and resolve order claims in agent order.
    fn apply_decisions(&mut self, decisions: Vec<(AgentId, Decision)>) -> SimResult<()> {
        for (agent, decision) in decisions {
            let i = agent.index();
            self.minds[i] = decision.mind;
            let Some(action) = decision.order else { continue };
            if !self.orders.apply(agent, action)? {
                trace!(%agent, "order already taken; intent dropped");
                self.minds[i].intent = None;
                self.minds[i].relabel();
            }
        }
        Ok(())
    }

    fn on_bed(&self, agent: AgentId) -> bool {
        let pos = self.agents.pos[agent.index()];
        self.world.feature_at(pos).is_some_and(|f| f.kind == FeatureKind::Bed)
    }

    fn effect_ctx(&mut self) -> (&E, EffectCtx<'_>) {
        let cx = EffectCtx {
            agents: &mut self.agents,
            world:  &mut self.world,
            needs:  &self.needs,
            scorer: &*self.scorer,
        };
        (&self.effects, cx)
    }

    /// Energy at the collapse floor off a bed: fall asleep on the spot,
    /// skipping the sleep action's duration.
    fn collapse_if_spent(&mut self, agent: AgentId) -> SimResult<bool> {
        let i = agent.index();
        if self.agents.stats[i].energy > self.needs.collapse_floor || self.on_bed(agent) {
            return Ok(false);
        }
        if let Some(order) = self.minds[i].intent.take().and_then(|intent| intent.order) {
            self.orders.pause(order, agent)?;
        }
        let (fx, mut cx) = self.effect_ctx();
        fx.start_sleep(agent, false, &mut cx);
        self.mobility.store.reset(agent);
        let mind = &mut self.minds[i];
        mind.relabel();
        mind.activity = "collapsed";
        debug!(%agent, pos = %self.agents.pos[i], "collapsed");
        Ok(true)
    }

    /// Phase 4 for one agent.  Returns the intent to keep, if any.
    fn execute(&mut self, agent: AgentId, mut intent: Intent, summary: &mut TickSummary) -> SimResult<Option<Intent>> {
        let i = agent.index();
        if !intent.target_valid(agent, &self.agents, &self.world) {
            trace!(%agent, goal = intent.goal.as_str(), "target lost before acting");
            self.mobility.store.reset(agent);
            return Ok(None);
        }
        let dt = self.config.tick_duration_secs;

        if intent.action == ActionKind::Move {
            let from = self.agents.pos[i];
            let speed = self.mobility.effective_speed(
                self.agents.base_speed[i],
                &self.agents.stats[i],
                self.agents.status[i].poisoned(),
                &self.needs,
            );
            let req = StepRequest { agent, from, step: intent.step, goal: intent.dest, speed };
            match self.mobility.advance(req, dt, &mut self.world, &mut self.agents.stats[i], &self.needs) {
                StepOutcome::Stepped(to) => {
                    self.agents.pos[i] = to;
                    intent.rederive(to);
                    summary.steps += 1;
                }
                StepOutcome::Blocked => summary.blocked += 1,
                StepOutcome::Waiting => {}
            }
            return Ok(Some(intent));
        }

        let duration = self.behavior_config.durations.of(intent.action).unwrap_or(0.0);
        intent.progress += dt;
        if intent.progress < duration {
            return Ok(Some(intent));
        }
        intent.progress = 0.0;

        let fired = self.fire(agent, &intent);
        if fired {
            summary.effects += 1;
            if let Some(order) = intent.order {
                if finishes_order(intent.goal) {
                    self.orders.complete(order)?;
                    debug!(%agent, %order, "order completed");
                }
            }
        }
        if self.agents.status[i].sleeping {
            self.mobility.store.reset(agent);
        }
        Ok((fired && intent.drinks_at_source()).then_some(intent))
    }

    /// Dispatch the terminal effect for a completed action.
    fn fire(&mut self, agent: AgentId, intent: &Intent) -> bool {
        let at_bed = self.on_bed(agent);
        let (fx, mut cx) = self.effect_ctx();
        let cx = &mut cx;
        match (intent.goal, intent.target) {
            (ActionKind::Consume, Some(Target::Carried(slot))) => fx.consume(agent, Food::Carried(slot), cx),
            (ActionKind::Consume, Some(Target::Item(id)))      => fx.consume(agent, Food::Ground(id), cx),
            (ActionKind::Drink, Some(Target::Carried(slot)))   => fx.drink(agent, DrinkFrom::Vessel(slot), cx),
            (ActionKind::Drink, _)                             => fx.drink(agent, DrinkFrom::Source, cx),
            (ActionKind::Sleep, _) => {
                fx.start_sleep(agent, at_bed, cx);
                true
            }
            (ActionKind::PickUp, Some(Target::Item(id)))       => fx.pick_up(agent, id, cx),
            (ActionKind::Look, Some(Target::Item(id)))         => fx.look(agent, id, cx),
            (ActionKind::Talk, Some(Target::Agent(other)))     => fx.talk(agent, other, cx),
            (ActionKind::FillVessel, _)                        => fx.fill_vessel(agent, cx),
            (ActionKind::TillSoil, _)                          => fx.till_soil(agent, intent.dest, cx),
            (ActionKind::Craft, Some(Target::Carried(slot)))   => fx.craft(agent, slot, cx),
            (ActionKind::Move, _) => false,
            (goal, target) => {
                trace!(%agent, goal = goal.as_str(), ?target, "no effect for target");
                false
            }
        }
    }
}

/// Goal actions whose success completes the order they serve.
fn finishes_order(goal: ActionKind) -> bool {
    match goal {
        ActionKind::FillVessel | ActionKind::TillSoil | ActionKind::Craft => true,
        ActionKind::Move
        | ActionKind::Consume
        | ActionKind::Drink
        | ActionKind::Sleep
        | ActionKind::PickUp
        | ActionKind::Talk
        | ActionKind::Look => false,
    }
}
