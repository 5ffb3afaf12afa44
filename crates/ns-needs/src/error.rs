use ns_core::StatKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeedsError {
    #[error("{stat} thresholds are not ordered: {reason}")]
    InvalidThresholds {
        stat:   StatKind,
        reason: String,
    },

    #[error("{stat} thresholds must be inverted={expected}")]
    WrongDirection {
        stat:     StatKind,
        expected: bool,
    },
}

pub type NeedsResult<T> = Result<T, NeedsError>;
