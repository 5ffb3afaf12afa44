//! Unit tests for ns-mobility.

use ns_core::{AgentId, Pos};
use ns_needs::{NeedsConfig, Stats};
use ns_world::{GridWorld, GridWorldBuilder, SpatialStore};

use crate::{MobilityEngine, MovementConfig, StepOutcome, StepRequest};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A0: AgentId = AgentId(0);
const A1: AgentId = AgentId(1);

fn open_field(agents: &[(AgentId, Pos)]) -> GridWorld {
    let mut world = GridWorldBuilder::new(10, 10).build().unwrap();
    for &(a, p) in agents {
        world.place_agent(a, p).unwrap();
    }
    world
}

fn request(agent: AgentId, from: Pos, goal: Pos, speed: f32) -> StepRequest {
    StepRequest { agent, from, step: from.step_toward(goal), goal, speed }
}

// ── Accumulator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod accumulator_tests {
    use super::*;

    #[test]
    fn waits_until_threshold() {
        let mut world = open_field(&[(A0, Pos::new(0, 0))]);
        let mut engine = MobilityEngine::new(MovementConfig::default(), 1);
        let mut stats = Stats::default();
        let needs = NeedsConfig::default();
        let req = request(A0, Pos::new(0, 0), Pos::new(5, 0), 2.0);

        assert_eq!(engine.advance(req, 0.25, &mut world, &mut stats, &needs), StepOutcome::Waiting);
        assert_eq!(
            engine.advance(req, 0.25, &mut world, &mut stats, &needs),
            StepOutcome::Stepped(Pos::new(1, 0))
        );
        assert_eq!(world.occupant(Pos::new(1, 0)), Some(A0));
        assert_eq!(engine.store.get(A0).accumulator, 0.0);
    }

    #[test]
    fn no_drift_over_many_ticks() {
        // 0.3 cells/s × 0.25 s = 0.075 per tick; 1000 ticks → 75 steps exactly.
        let mut world = GridWorldBuilder::new(200, 1).build().unwrap();
        world.place_agent(A0, Pos::new(0, 0)).unwrap();
        let mut engine = MobilityEngine::new(MovementConfig::default(), 1);
        let mut stats = Stats::default();
        let needs = NeedsConfig::default();
        let goal = Pos::new(199, 0);

        let mut pos = Pos::new(0, 0);
        let mut steps = 0u32;
        for _ in 0..1000 {
            let req = request(A0, pos, goal, 0.3);
            if let StepOutcome::Stepped(to) = engine.advance(req, 0.25, &mut world, &mut stats, &needs) {
                pos = to;
                steps += 1;
            }
        }
        let expected = (1000.0_f64 * 0.3_f32 as f64 * 0.25).floor() as u32;
        assert_eq!(steps, expected);
        assert_eq!(pos, Pos::new(expected as i32, 0));
        assert_eq!(engine.store.get(A0).steps, u64::from(expected));
    }

    #[test]
    fn step_costs_energy_unless_rested() {
        let mut world = open_field(&[(A0, Pos::new(0, 0))]);
        let mut engine = MobilityEngine::new(MovementConfig::default(), 1);
        let needs = NeedsConfig::default();
        let mut stats = Stats::default();

        engine.advance(request(A0, Pos::new(0, 0), Pos::new(5, 5), 4.0), 0.25, &mut world, &mut stats, &needs);
        assert!((stats.energy - (90.0 - 0.05)).abs() < 1e-4);

        engine.store.start_rested(A0, 5.0);
        let before = stats.energy;
        engine.advance(request(A0, Pos::new(1, 1), Pos::new(5, 5), 4.0), 0.25, &mut world, &mut stats, &needs);
        assert_eq!(stats.energy, before);
    }

    #[test]
    fn rested_window_counts_down() {
        let mut engine = MobilityEngine::new(MovementConfig::default(), 2);
        engine.store.start_rested(A1, 1.0);
        engine.store.tick_cooldowns(0.75);
        assert!(engine.store.get(A1).is_rested());
        engine.store.tick_cooldowns(0.75);
        assert!(!engine.store.get(A1).is_rested());
        assert!(!engine.store.get(A0).is_rested());
    }

    #[test]
    fn effective_speed_modifiers() {
        let engine = MobilityEngine::new(MovementConfig::default(), 1);
        let needs = NeedsConfig::default();
        let fresh = Stats::default();
        let exhausted = Stats { energy: 15.0, ..Stats::default() };
        assert_eq!(engine.effective_speed(2.0, &fresh, false, &needs), 2.0);
        assert_eq!(engine.effective_speed(2.0, &exhausted, false, &needs), 1.0);
        assert_eq!(engine.effective_speed(2.0, &exhausted, true, &needs), 0.75);
    }
}

// ── Collision fallback ────────────────────────────────────────────────────────

#[cfg(test)]
mod collision_tests {
    use super::*;
    use crate::candidates;

    #[test]
    fn candidate_order() {
        let c = candidates(Pos::new(0, 0), Pos::new(1, 1), Pos::new(3, 2));
        assert_eq!(c[0], Pos::new(1, 1), "planned step first");
        assert_eq!(c[1], Pos::new(1, 0), "dominant axis next");
        assert_eq!(c[2], Pos::new(0, 1));
        assert_eq!(c.len(), 8, "no duplicates, never the current cell");
        assert!(!c.contains(&Pos::new(0, 0)));
    }

    #[test]
    fn occupied_step_falls_back_to_axis() {
        let mut world = open_field(&[(A0, Pos::new(0, 0)), (A1, Pos::new(1, 1))]);
        let mut engine = MobilityEngine::new(MovementConfig::default(), 2);
        let needs = NeedsConfig::default();
        let mut stats = Stats::default();
        let out = engine.advance(request(A0, Pos::new(0, 0), Pos::new(5, 3), 4.0), 0.25, &mut world, &mut stats, &needs);
        assert_eq!(out, StepOutcome::Stepped(Pos::new(1, 0)));
    }

    #[test]
    fn boxed_in_agent_gets_half_refund() {
        // Corner (0,0) with all three neighbours taken.
        let mut world = open_field(&[
            (A0, Pos::new(0, 0)),
            (A1, Pos::new(1, 0)),
            (AgentId(2), Pos::new(0, 1)),
            (AgentId(3), Pos::new(1, 1)),
        ]);
        let mut engine = MobilityEngine::new(MovementConfig::default(), 4);
        let needs = NeedsConfig::default();
        let mut stats = Stats::default();
        let out = engine.advance(request(A0, Pos::new(0, 0), Pos::new(5, 5), 4.0), 0.25, &mut world, &mut stats, &needs);
        assert_eq!(out, StepOutcome::Blocked);
        assert_eq!(engine.store.get(A0).accumulator, 0.5);
        assert_eq!(stats, Stats::default(), "no energy spent");
        assert_eq!(world.occupant(Pos::new(0, 0)), Some(A0));
    }

    #[test]
    fn rock_is_walked_around() {
        let mut b = GridWorldBuilder::new(5, 5);
        b.rock(Pos::new(1, 0));
        let mut world = b.build().unwrap();
        world.place_agent(A0, Pos::new(0, 0)).unwrap();
        let mut engine = MobilityEngine::new(MovementConfig::default(), 1);
        let needs = NeedsConfig::default();
        let mut stats = Stats::default();
        let out = engine.advance(request(A0, Pos::new(0, 0), Pos::new(4, 0), 4.0), 0.25, &mut world, &mut stats, &needs);
        assert_eq!(out, StepOutcome::Stepped(Pos::new(1, 1)));
    }

    #[test]
    fn two_agents_one_cell() {
        // Both plan to enter (1,0); the first mover wins, the second sidesteps.
        let mut world = open_field(&[(A0, Pos::new(0, 0)), (A1, Pos::new(2, 0))]);
        let mut engine = MobilityEngine::new(MovementConfig::default(), 2);
        let needs = NeedsConfig::default();
        let mut s0 = Stats::default();
        let mut s1 = Stats::default();

        let r0 = StepRequest { agent: A0, from: Pos::new(0, 0), step: Pos::new(1, 0), goal: Pos::new(1, 0), speed: 4.0 };
        let r1 = StepRequest { agent: A1, from: Pos::new(2, 0), step: Pos::new(1, 0), goal: Pos::new(1, 0), speed: 4.0 };
        let o0 = engine.advance(r0, 0.25, &mut world, &mut s0, &needs);
        let o1 = engine.advance(r1, 0.25, &mut world, &mut s1, &needs);

        assert_eq!(o0, StepOutcome::Stepped(Pos::new(1, 0)));
        assert_eq!(world.occupant(Pos::new(1, 0)), Some(A0));
        match o1 {
            StepOutcome::Stepped(p) => assert_ne!(p, Pos::new(1, 0)),
            StepOutcome::Blocked | StepOutcome::Waiting => {}
        }
    }

    #[test]
    fn config_validation() {
        assert!(MovementConfig::default().validate().is_ok());
        let bad = MovementConfig { step_threshold: 0.0, ..MovementConfig::default() };
        assert!(bad.validate().is_err());
    }
}
