//! World-storage error type.

use thiserror::Error;

use ns_core::{AgentId, Pos};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("cell {0} is blocked")]
    Blocked(Pos),

    #[error("cell {pos} is occupied by {by}")]
    Occupied { pos: Pos, by: AgentId },

    #[error("{agent} is not at {pos}")]
    NotAt { agent: AgentId, pos: Pos },
}

pub type WorldResult<T> = Result<T, WorldError>;
