use thiserror::Error;

use ns_core::{AgentId, OrderId};

#[derive(Debug, Error, PartialEq)]
pub enum BehaviorError {
    #[error("behavior configuration error: {field}: {reason}")]
    Config { field: &'static str, reason: String },

    #[error("{0} does not exist")]
    OrderNotFound(OrderId),

    #[error("{order} is held by {by}")]
    OrderHeld { order: OrderId, by: AgentId },

    #[error("{0} is already done")]
    OrderDone(OrderId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
