//! Framework error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `ChoiceError`, …)
//! and either wrap `MsError` as one variant or convert into it via `From`.

use thiserror::Error;

/// The top-level error type for `ms-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MsError {
    /// A public contract was called with malformed input (e.g. a zero bound
    /// passed to [`RandomSource::next_int`][crate::RandomSource::next_int]).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ms-*` crates.
pub type MsResult<T> = Result<T, MsError>;
