//! The `BehaviorModel` trait, the scheduler's extension point.

use ns_core::{AgentId, AgentRng};

use crate::{Mind, OrderAction, SimContext, formation};

/// What one agent decided this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// Updated scheduler state, stored back by ns-sim in the apply phase.
    pub mind:  Mind,
    /// Order-board change to apply serially.
    pub order: Option<OrderAction>,
}

/// Pluggable agent decision-making.
///
/// `decide` receives a read-only [`SimContext`], the agent's current [`Mind`]
/// (by reference; return an updated copy), and its own [`AgentRng`], so the
/// outcome never depends on thread ordering.
///
/// # Thread safety
///
/// ns-sim may call `decide` for many agents in parallel via Rayon, so
/// implementations must be `Send + Sync`.  Per-agent state belongs in `Mind`,
/// not in the model.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per tick for every living, awake agent.
    fn decide(
        &self,
        agent: AgentId,
        mind:  &Mind,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Decision;
}

/// Needs-driven intent scheduler: hysteresis, priority, frustration, orders,
/// and idling.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeedsScheduler;

impl BehaviorModel for NeedsScheduler {
    fn decide(
        &self,
        agent: AgentId,
        mind:  &Mind,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Decision {
        formation::decide(agent, mind, ctx, rng)
    }
}
