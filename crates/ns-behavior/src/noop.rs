//! A no-op behavior model: agents never form intents.

use ns_core::{AgentId, AgentRng};

use crate::{BehaviorModel, Decision, Mind, SimContext};

/// A [`BehaviorModel`] that clears every intent.
///
/// Useful for exercising the need system alone, or for passive agents that
/// simply occupy cells.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(
        &self,
        _agent: AgentId,
        _mind:  &Mind,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Decision {
        Decision { mind: Mind::new(), order: None }
    }
}
