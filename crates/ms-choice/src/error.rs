use ms_core::MsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChoiceError {
    /// Malformed input to a choice model (negative weights, NaN utilities, …).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("random source error: {0}")]
    Random(#[from] MsError),
}

pub type ChoiceResult<T> = Result<T, ChoiceError>;
