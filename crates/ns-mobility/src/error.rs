use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MobilityError {
    #[error("movement configuration error: {field}: {reason}")]
    Config { field: &'static str, reason: String },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
