//! Per-agent deterministic RNG.
//!
//! The only randomness in a run is the idle-activity draw, and every agent
//! draws from its own stream seeded from the run seed and its id. Results
//! therefore do not depend on decide-phase ordering or thread count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Golden-ratio multiplier spreading adjacent agent ids across seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ u64::from(agent.0).wrapping_mul(SEED_SPREAD);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform draw from `options`; `None` when empty.
    pub fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        if options.is_empty() {
            return None;
        }
        Some(options[self.0.gen_range(0..options.len())])
    }
}
