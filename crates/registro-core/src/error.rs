//! Error types for registro core.

use thiserror::Error;

/// Errors produced by pure record operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("field {0} cannot be updated")]
    UnknownField(String),

    #[error("malformed hash: {0}")]
    MalformedHash(String),
}
