use ns_behavior::BehaviorError;
use ns_mobility::MobilityError;
use ns_needs::NeedsError;
use ns_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("needs configuration error: {0}")]
    Needs(#[from] NeedsError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("movement configuration error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize scenario TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type SimResult<T> = Result<T, SimError>;
