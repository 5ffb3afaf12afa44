//! Scenario tests for ns-sim.

use ns_agent::{AgentSpec, AgentStoreBuilder, Carried, Preference, Preferences};
use ns_behavior::{ActionKind, Frustration, Mind, NeedsScheduler, OrderKind, OrderStatus};
use ns_core::{AgentId, Color, ItemKind, OrderId, Pos, SimConfig, Tick, Variety};
use ns_mobility::MovementConfig;
use ns_needs::{DriftRates, NeedsConfig, Stats};
use ns_world::{GridWorldBuilder, SpatialStore, WorldError};

use crate::{NoopObserver, ScenarioConfig, Sim, SimBuilder, SimError, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

const MUSHROOM: Variety = Variety::new(ItemKind::Mushroom, Color::Brown);
const VESSEL: Variety = Variety::new(ItemKind::Vessel, Color::Brown);

fn test_config() -> SimConfig {
    SimConfig {
        tick_duration_secs:    0.25,
        total_ticks:           40,
        seed:                  7,
        num_threads:           Some(1),
        output_interval_ticks: 0,
    }
}

/// Default thresholds, but nothing drifts and health never regenerates, so
/// each test controls the stats it cares about.
fn still_needs() -> NeedsConfig {
    NeedsConfig {
        drift: DriftRates {
            hunger_per_sec: 0.0,
            thirst_per_sec: 0.0,
            energy_per_sec: 0.0,
            mood_per_sec:   0.0,
            ..DriftRates::default()
        },
        health_regen_per_sec: 0.0,
        ..NeedsConfig::default()
    }
}

fn free_steps() -> MovementConfig {
    MovementConfig { step_energy_cost: 0.0, ..MovementConfig::default() }
}

fn stats(hunger: f32, thirst: f32, energy: f32) -> Stats {
    Stats { hunger, thirst, energy, ..Stats::default() }
}

/// Speed 4 cells/s at 0.25 s per tick: one step per tick.
fn agent(x: i32, y: i32, s: Stats) -> AgentSpec {
    AgentSpec::at(Pos::new(x, y)).with_stats(s).with_speed(4.0)
}

fn build_sim(world: &GridWorldBuilder, specs: Vec<AgentSpec>, orders: Vec<OrderKind>) -> Sim<NeedsScheduler> {
    let (agents, rngs) = AgentStoreBuilder::new(7).spawn_all(specs).build();
    SimBuilder::new(test_config(), agents, rngs, world.build().unwrap(), NeedsScheduler)
        .needs(still_needs())
        .movement(free_steps())
        .orders(orders)
        .build()
        .unwrap()
}

/// Records every tick summary.
#[derive(Default)]
struct Recorder {
    summaries: Vec<TickSummary>,
    snapshots: usize,
    ended:     Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }

    fn on_snapshot(&mut self, _tick: Tick, _agents: &ns_agent::AgentStore, _minds: &[Mind]) {
        self.snapshots += 1;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn places_every_agent_in_the_world() {
        let sim = build_sim(
            &GridWorldBuilder::new(8, 8),
            vec![agent(1, 1, Stats::default()), agent(5, 2, Stats::default())],
            vec![],
        );
        assert_eq!(sim.world.occupant(Pos::new(1, 1)), Some(AgentId(0)));
        assert_eq!(sim.world.occupant(Pos::new(5, 2)), Some(AgentId(1)));
        assert_eq!(sim.minds.len(), 2);
    }

    #[test]
    fn rng_count_mismatch_errors() {
        let (agents, _) = AgentStoreBuilder::new(1).spawn(AgentSpec::at(Pos::new(0, 0))).build();
        let (_, rngs) = AgentStoreBuilder::new(1)
            .spawn_all([AgentSpec::at(Pos::new(0, 0)), AgentSpec::at(Pos::new(1, 0))])
            .build();
        let world = GridWorldBuilder::new(4, 4).build().unwrap();
        let result = SimBuilder::new(test_config(), agents, rngs, world, NeedsScheduler).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 1, got: 2, what: "agent RNGs" })
        ));
    }

    #[test]
    fn mind_count_mismatch_errors() {
        let (agents, rngs) = AgentStoreBuilder::new(1).spawn(AgentSpec::at(Pos::new(0, 0))).build();
        let world = GridWorldBuilder::new(4, 4).build().unwrap();
        let result = SimBuilder::new(test_config(), agents, rngs, world, NeedsScheduler)
            .minds(vec![Mind::new(); 3])
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { what: "minds", .. })));
    }

    #[test]
    fn shared_start_cell_errors() {
        let (agents, rngs) = AgentStoreBuilder::new(1)
            .spawn_all([AgentSpec::at(Pos::new(2, 2)), AgentSpec::at(Pos::new(2, 2))])
            .build();
        let world = GridWorldBuilder::new(4, 4).build().unwrap();
        let result = SimBuilder::new(test_config(), agents, rngs, world, NeedsScheduler).build();
        assert!(matches!(
            result,
            Err(SimError::World(WorldError::Occupied { by: AgentId(0), .. }))
        ));
    }

    #[test]
    fn unordered_thresholds_error() {
        let mut needs = NeedsConfig::default();
        needs.thresholds.hunger.severe = 40.0;
        let (agents, rngs) = AgentStoreBuilder::new(1).build();
        let world = GridWorldBuilder::new(4, 4).build().unwrap();
        let result = SimBuilder::new(test_config(), agents, rngs, world, NeedsScheduler)
            .needs(needs)
            .build();
        assert!(matches!(result, Err(SimError::Needs(_))));
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut sim = build_sim(&GridWorldBuilder::new(4, 4), vec![agent(0, 0, Stats::default())], vec![]);
        sim.config.output_interval_ticks = 10;
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.summaries.len(), 40);
        assert_eq!(rec.snapshots, 4);
        assert_eq!(rec.ended, Some(Tick(40)));
        assert_eq!(sim.clock.current_tick, Tick(40));
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement_tests {
    use super::*;

    #[test]
    fn accumulator_keeps_fractional_remainder() {
        // 1.5 cells/s × 0.25 s = 0.375 per tick → 16 ticks cover exactly 6 cells.
        let mut world = GridWorldBuilder::new(24, 3);
        world.water(Pos::new(20, 0));
        let spec = AgentSpec::at(Pos::new(0, 0)).with_stats(stats(20.0, 70.0, 90.0)).with_speed(1.5);
        let mut sim = build_sim(&world, vec![spec], vec![]);

        sim.run_ticks(16, &mut NoopObserver).unwrap();

        assert_eq!(sim.agents.pos[0], Pos::new(6, 0));
        let state = sim.mobility.store.get(AgentId(0));
        assert_eq!(state.steps, 6);
        assert_eq!(state.accumulator, 0.0);
    }

    #[test]
    fn contested_step_falls_back_to_an_alternate_cell() {
        // Agent 0 heads east for water, agent 1 heads south-west for a bed;
        // both plan to step onto (1, 1) in the same tick.
        let mut world = GridWorldBuilder::new(6, 3);
        world.water(Pos::new(4, 1)).bed(Pos::new(0, 2));
        let mut sim = build_sim(
            &world,
            vec![agent(0, 1, stats(20.0, 70.0, 90.0)), agent(2, 0, stats(20.0, 20.0, 40.0))],
            vec![],
        );

        sim.run_ticks(1, &mut NoopObserver).unwrap();

        assert_eq!(sim.agents.pos[0], Pos::new(1, 1));
        assert_eq!(sim.world.occupant(Pos::new(1, 1)), Some(AgentId(0)));
        assert_eq!(sim.agents.pos[1], Pos::new(1, 0));
        let intent = sim.minds[1].intent.as_ref().expect("loser keeps its intent");
        assert_eq!(intent.goal, ActionKind::Sleep);
        assert_eq!(intent.dest, Pos::new(0, 2));
    }

    #[test]
    fn claimed_source_drops_the_late_intent() {
        // Both agents reach the single spring's neighbourhood together; the
        // one processed second finds it taken and simply has no intent.
        let mut world = GridWorldBuilder::new(5, 1);
        world.water(Pos::new(2, 0));
        let mut sim = build_sim(
            &world,
            vec![agent(1, 0, stats(20.0, 70.0, 90.0)), agent(3, 0, stats(20.0, 70.0, 90.0))],
            vec![],
        );

        sim.run_ticks(1, &mut NoopObserver).unwrap();

        assert_eq!(sim.agents.pos[0], Pos::new(2, 0));
        assert_eq!(sim.agents.pos[1], Pos::new(3, 0));
        assert!(sim.minds[1].intent.is_none());
    }
}

// ── Needs and actions ─────────────────────────────────────────────────────────

#[cfg(test)]
mod need_tests {
    use super::*;

    fn dislikes_mushrooms(spec: AgentSpec) -> AgentSpec {
        spec.with_preferences(Preferences(vec![Preference::dislikes(Some(ItemKind::Mushroom), None)]))
    }

    #[test]
    fn drink_at_source_continues_until_thirst_is_zero() {
        let mut world = GridWorldBuilder::new(3, 1);
        world.water(Pos::new(1, 0));
        let mut sim = build_sim(&world, vec![agent(1, 0, stats(20.0, 60.0, 90.0))], vec![]);

        // One sip per second (4 ticks), 20 thirst each.
        sim.run_ticks(8, &mut NoopObserver).unwrap();
        assert_eq!(sim.agents.stats[0].thirst, 20.0);
        let intent = sim.minds[0].intent.as_ref().expect("still drinking below Mild");
        assert_eq!(intent.goal, ActionKind::Drink);

        sim.run_ticks(4, &mut NoopObserver).unwrap();
        assert_eq!(sim.agents.stats[0].thirst, 0.0);
        assert!(sim.agents.cooldowns[0].is_active(ns_core::StatKind::Thirst));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.minds[0].intent.as_ref().is_none_or(|i| i.goal != ActionKind::Drink));
    }

    #[test]
    fn starving_agent_eats_disliked_food() {
        let mut world = GridWorldBuilder::new(6, 1);
        world.item(MUSHROOM, Pos::new(3, 0));
        let spec = dislikes_mushrooms(agent(0, 0, stats(95.0, 20.0, 90.0)));
        let mut sim = build_sim(&world, vec![spec], vec![]);

        // Three steps, then six ticks of eating.
        sim.run_ticks(9, &mut NoopObserver).unwrap();

        assert_eq!(sim.world.item_count(), 0);
        assert_eq!(sim.agents.stats[0].hunger, 60.0);
        assert_eq!(sim.agents.stats[0].mood, 67.0);
        assert!(sim.agents.knowledge[0].contains(&MUSHROOM));
    }

    #[test]
    fn peckish_agent_never_eats_disliked_food() {
        let mut world = GridWorldBuilder::new(6, 1);
        world.item(MUSHROOM, Pos::new(3, 0));
        let spec = dislikes_mushrooms(agent(0, 0, stats(60.0, 20.0, 90.0)));
        let mut sim = build_sim(&world, vec![spec], vec![]);

        for _ in 0..20 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            assert!(sim.minds[0].intent.as_ref().is_none_or(|i| i.goal != ActionKind::Consume));
        }
        assert_eq!(sim.agents.stats[0].hunger, 60.0);
    }

    #[test]
    fn carried_full_vessel_quenches_thirst_in_place() {
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, stats(20.0, 70.0, 90.0))], vec![]);
        sim.agents.inventory[0].push(Carried { variety: VESSEL, water: true, poisonous: false });

        sim.run_ticks(4, &mut NoopObserver).unwrap();

        assert_eq!(sim.agents.stats[0].thirst, 30.0);
        assert!(sim.agents.inventory[0].get(0).is_some_and(Carried::is_empty_vessel));
        assert_eq!(sim.agents.pos[0], Pos::new(1, 1));
    }

    #[test]
    fn poisonous_food_starts_the_poison_timer() {
        let mut world = GridWorldBuilder::new(3, 1);
        world.poisonous_item(MUSHROOM, Pos::new(0, 0));
        let mut sim = build_sim(&world, vec![agent(0, 0, stats(95.0, 20.0, 90.0))], vec![]);

        // Six ticks of eating, then one tick of poison damage.
        sim.run_ticks(7, &mut NoopObserver).unwrap();

        assert!(sim.agents.status[0].poisoned());
        assert!(sim.agents.stats[0].health < 100.0);
    }

    #[test]
    fn unmet_severe_need_leads_to_frustration() {
        let mut sim = build_sim(&GridWorldBuilder::new(4, 4), vec![agent(0, 0, stats(92.0, 20.0, 90.0))], vec![]);

        sim.run_ticks(9, &mut NoopObserver).unwrap();
        assert_eq!(sim.minds[0].failures, 9);
        assert!(!sim.minds[0].frustration.is_frustrated());

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(sim.minds[0].frustration.is_frustrated());
        assert_eq!(sim.minds[0].failures, 0);
        assert_eq!(sim.minds[0].activity, "frustrated");
        assert_eq!(rec.summaries[0].frustrated, 1);
    }

    #[test]
    fn starvation_kills_and_vacates_the_cell() {
        let spec = agent(2, 2, Stats { hunger: 100.0, health: 0.5, ..Stats::default() });
        let mut sim = build_sim(&GridWorldBuilder::new(5, 5), vec![spec], vec![]);
        let mut rec = Recorder::default();

        sim.run_ticks(2, &mut rec).unwrap();

        assert!(sim.agents.status[0].dead);
        assert_eq!(sim.world.occupant(Pos::new(2, 2)), None);
        assert_eq!(sim.minds[0].activity, "dead");
        assert!(sim.minds[0].intent.is_none());
        assert_eq!(sim.alive_count(), 0);
        assert_eq!(rec.summaries[1].deaths, 1);
        assert_eq!(rec.summaries[1].alive, 0);
    }
}

// ── Sleep ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sleep_tests {
    use super::*;

    #[test]
    fn sleeper_wakes_at_full_energy() {
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, stats(20.0, 20.0, 99.0))], vec![]);
        sim.agents.status[0].sleeping = true;

        // Ground sleep regains 2 energy/s: 0.5 per tick.
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agents.status[0].sleeping);

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.agents.status[0].sleeping);
        assert!(sim.agents.cooldowns[0].is_active(ns_core::StatKind::Energy));
        assert!(sim.mobility.store.get(AgentId(0)).is_rested());
    }

    #[test]
    fn crisis_hunger_wakes_a_rested_sleeper() {
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, stats(96.0, 20.0, 50.0))], vec![]);
        sim.agents.status[0].sleeping = true;
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.agents.status[0].sleeping);
    }

    #[test]
    fn crisis_hunger_does_not_wake_an_exhausted_sleeper() {
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, stats(96.0, 20.0, 15.0))], vec![]);
        sim.agents.status[0].sleeping = true;
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agents.status[0].sleeping);
    }

    #[test]
    fn spent_agent_collapses_instantly() {
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, stats(20.0, 20.0, 0.0))], vec![]);
        let mut rec = Recorder::default();

        sim.run_ticks(1, &mut rec).unwrap();

        let status = sim.agents.status[0];
        assert!(status.sleeping);
        assert!(!status.at_rest_site);
        assert_eq!(sim.minds[0].activity, "collapsed");
        assert_eq!(rec.summaries[0].collapses, 1);
    }

    #[test]
    fn spent_agent_on_a_bed_sleeps_normally() {
        let mut world = GridWorldBuilder::new(3, 3);
        world.bed(Pos::new(1, 1));
        let mut sim = build_sim(&world, vec![agent(1, 1, stats(20.0, 20.0, 0.0))], vec![]);

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(!sim.agents.status[0].sleeping);

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agents.status[0].sleeping);
        assert!(sim.agents.status[0].at_rest_site);
    }

    #[test]
    fn timers_run_down_while_asleep() {
        let (agents, rngs) = AgentStoreBuilder::new(7).spawn(agent(1, 1, stats(20.0, 20.0, 10.0))).build();
        let frustrated = Mind {
            frustration: Frustration::Frustrated { remaining_secs: 1.0 },
            idle_cooldown: 2.0,
            ..Mind::new()
        };
        let mut sim = SimBuilder::new(test_config(), agents, rngs, GridWorldBuilder::new(3, 3).build().unwrap(), NeedsScheduler)
            .needs(still_needs())
            .movement(free_steps())
            .minds(vec![frustrated])
            .build()
            .unwrap();
        sim.agents.status[0].sleeping = true;

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(sim.agents.status[0].sleeping);
        assert_eq!(sim.minds[0].frustration, Frustration::Frustrated { remaining_secs: 0.25 });

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agents.status[0].sleeping, "energy is still far from full");
        assert_eq!(sim.minds[0].frustration, Frustration::Normal);
        assert_eq!(sim.minds[0].idle_cooldown, 1.0);
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod order_tests {
    use super::*;

    #[test]
    fn till_order_runs_to_completion() {
        let site = Pos::new(3, 0);
        let mut sim = build_sim(
            &GridWorldBuilder::new(5, 1),
            vec![agent(0, 0, Stats::default())],
            vec![OrderKind::TillSoil(site)],
        );

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Assigned(AgentId(0)));

        // Two more steps, then 3 s of tilling.
        sim.run_ticks(14, &mut NoopObserver).unwrap();
        assert!(sim.world.is_tilled(site));
        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Done);
    }

    #[test]
    fn first_agent_in_order_wins_a_contested_order() {
        let mut sim = build_sim(
            &GridWorldBuilder::new(7, 1),
            vec![agent(0, 0, Stats::default()), agent(6, 0, Stats::default())],
            vec![OrderKind::TillSoil(Pos::new(3, 0))],
        );

        sim.run_ticks(1, &mut NoopObserver).unwrap();

        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Assigned(AgentId(0)));
        assert!(sim.minds[1].intent.as_ref().is_none_or(|i| i.order.is_none()));
    }

    #[test]
    fn death_returns_held_orders_to_the_board() {
        let mut sim = build_sim(
            &GridWorldBuilder::new(8, 1),
            vec![agent(0, 0, Stats::default())],
            vec![OrderKind::TillSoil(Pos::new(6, 0))],
        );
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        sim.agents.stats[0].health = 0.0;

        sim.run_ticks(1, &mut NoopObserver).unwrap();

        assert!(sim.agents.status[0].dead);
        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Open);
    }

    #[test]
    fn fill_vessel_fetches_then_fills() {
        let mut world = GridWorldBuilder::new(6, 1);
        world.item(VESSEL, Pos::new(2, 0)).water(Pos::new(4, 0));
        let mut sim = build_sim(&world, vec![agent(0, 0, Stats::default())], vec![OrderKind::FillVessel]);

        // Walk 2, pick up (2 ticks), walk 2, fill (4 ticks).
        sim.run_ticks(12, &mut NoopObserver).unwrap();

        assert!(sim.agents.inventory[0].get(0).is_some_and(Carried::is_full_vessel));
        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Done);
    }

    #[test]
    fn craft_turns_a_carried_gourd_into_a_vessel() {
        let gourd = Variety::new(ItemKind::Gourd, Color::White);
        let mut sim = build_sim(&GridWorldBuilder::new(3, 3), vec![agent(1, 1, Stats::default())], vec![OrderKind::CraftVessel]);
        sim.agents.inventory[0].push(Carried::new(gourd));

        // 4 s of crafting.
        sim.run_ticks(16, &mut NoopObserver).unwrap();

        let crafted = sim.agents.inventory[0].get(0).copied().unwrap();
        assert_eq!(crafted.variety, Variety::new(ItemKind::Vessel, Color::White));
        assert_eq!(sim.orders.get(OrderId(0)).unwrap().status, OrderStatus::Done);
    }
}

// ── Scenario files ────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    const PARTIAL: &str = r#"
        [sim]
        total_ticks = 100
        seed = 3

        [behavior]
        frustration_threshold = 4

        [world]
        width = 10
        height = 6
        water = [{ x = 2, y = 2 }]
        beds = [{ x = 8, y = 1 }]
        items = [
            { kind = "berry", color = "red", pos = { x = 5, y = 5 } },
            { kind = "mushroom", color = "white", pos = { x = 6, y = 5 }, poisonous = true },
        ]

        [[agents]]
        pos = { x = 1, y = 1 }
        stats = { hunger = 80.0 }
        likes = [{ kind = "berry", color = "red" }]

        [[agents]]
        pos = { x = 7, y = 3 }
        speed = 1.5
        dislikes = [{ color = "white" }]

        [[orders]]
        kind = "till_soil"
        pos = { x = 4, y = 4 }

        [[orders]]
        kind = "fill_vessel"
    "#;

    #[test]
    fn partial_file_keeps_defaults() {
        let scenario = ScenarioConfig::from_str(PARTIAL).unwrap();
        assert_eq!(scenario.sim.total_ticks, 100);
        assert_eq!(scenario.sim.tick_duration_secs, 0.25);
        assert_eq!(scenario.behavior.frustration_threshold, 4);
        assert_eq!(scenario.behavior.food_any_cutoff, 90.0);
        assert_eq!(scenario.needs, NeedsConfig::default());
        assert_eq!(scenario.agents.len(), 2);
        assert_eq!(scenario.agents[0].stats.map(|s| (s.hunger, s.thirst)), Some((80.0, 20.0)));
        assert!(scenario.world.items[1].poisonous);
        assert_eq!(
            scenario.order_kinds(),
            vec![OrderKind::TillSoil(Pos::new(4, 4)), OrderKind::FillVessel]
        );
    }

    #[test]
    fn scenario_builds_a_runnable_sim() {
        let scenario = ScenarioConfig::from_str(PARTIAL).unwrap();
        let mut sim = SimBuilder::from_scenario(&scenario, NeedsScheduler).unwrap().build().unwrap();

        assert_eq!(sim.agents.count, 2);
        assert_eq!(sim.agents.base_speed[1], 1.5);
        assert_eq!(sim.orders.len(), 2);
        assert_eq!(sim.world.item_count(), 2);
        assert_eq!(sim.behavior_config.frustration_threshold, 4);

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(100));
    }

    #[test]
    fn toml_round_trip_preserves_the_scenario() {
        let scenario = ScenarioConfig::from_str(PARTIAL).unwrap();
        let text = scenario.to_toml().unwrap();
        let again = ScenarioConfig::from_str(&text).unwrap();
        assert_eq!(again.agents.len(), 2);
        assert_eq!(again.world.water, vec![Pos::new(2, 2)]);
        assert_eq!(again.order_kinds(), scenario.order_kinds());
        assert_eq!(again.behavior, scenario.behavior);
    }

    #[test]
    fn invalid_cutoffs_fail_validation() {
        let scenario = ScenarioConfig::from_str("[behavior]\nfood_partial_cutoff = 95.0\n").unwrap();
        assert!(matches!(scenario.validate(), Err(SimError::Behavior(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(ScenarioConfig::from_str("[sim\n"), Err(SimError::Toml(_))));
    }

    #[test]
    fn item_off_the_grid_is_a_world_error() {
        let scenario = ScenarioConfig::from_str(
            "[world]\nwidth = 3\nheight = 3\nitems = [{ kind = \"nut\", color = \"brown\", pos = { x = 9, y = 0 } }]\n",
        )
        .unwrap();
        assert!(matches!(scenario.build_world(), Err(SimError::World(WorldError::OutOfBounds(_)))));
    }
}

// ── Parallel decide ───────────────────────────────────────────────────────────

#[cfg(test)]
#[cfg(feature = "parallel")]
mod parallel_tests {
    use super::*;

    const CROWD: &str = r#"
        [sim]
        total_ticks = 400
        seed = 11

        [world]
        width = 12
        height = 12
        water = [{ x = 1, y = 10 }, { x = 10, y = 1 }]
        beds = [{ x = 6, y = 6 }]
        rocks = [{ x = 5, y = 5 }, { x = 5, y = 6 }]
        items = [
            { kind = "berry", color = "red", pos = { x = 3, y = 3 } },
            { kind = "berry", color = "red", pos = { x = 8, y = 9 } },
            { kind = "nut", color = "brown", pos = { x = 9, y = 4 } },
            { kind = "mushroom", color = "white", pos = { x = 2, y = 7 }, poisonous = true },
        ]

        [[agents]]
        pos = { x = 0, y = 0 }
        stats = { hunger = 70.0, thirst = 60.0 }

        [[agents]]
        pos = { x = 11, y = 11 }
        stats = { energy = 25.0 }

        [[agents]]
        pos = { x = 4, y = 8 }
        likes = [{ kind = "berry", color = "red" }]

        [[agents]]
        pos = { x = 9, y = 2 }
        speed = 2.0

        [[agents]]
        pos = { x = 7, y = 10 }
        stats = { thirst = 85.0 }

        [[orders]]
        kind = "till_soil"
        pos = { x = 3, y = 9 }

        [[orders]]
        kind = "fill_vessel"
    "#;

    fn run_with_threads(n: usize) -> Sim<NeedsScheduler> {
        let mut scenario = ScenarioConfig::from_str(CROWD).unwrap();
        scenario.sim.num_threads = Some(n);
        let mut sim = SimBuilder::from_scenario(&scenario, NeedsScheduler).unwrap().build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        sim
    }

    #[test]
    fn thread_count_does_not_change_the_outcome() {
        let one = run_with_threads(1);
        let four = run_with_threads(4);

        assert_eq!(one.clock.current_tick, Tick(400));
        assert_eq!(one.agents.pos, four.agents.pos);
        assert_eq!(one.agents.stats, four.agents.stats);
        assert_eq!(one.agents.status, four.agents.status);
        let activities = |sim: &Sim<NeedsScheduler>| sim.minds.iter().map(|m| m.activity).collect::<Vec<_>>();
        assert_eq!(activities(&one), activities(&four));
        assert_eq!(one.world.item_count(), four.world.item_count());
    }
}
