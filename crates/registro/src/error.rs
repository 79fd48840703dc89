//! Error types for registry operations.

use registro_core::CoreError;
use registro_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Every error aborts the enclosing operation with no durable side effect;
/// the registry performs no retries.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Register on an id that is already present.
    #[error("record {0} already exists")]
    AlreadyExists(String),

    /// Verify or update on a missing id.
    #[error("record {0} not found")]
    NotFound(String),

    /// Malformed metadata payload on register.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Unknown field name on update.
    #[error("field {0} cannot be updated")]
    InvalidField(String),

    /// Underlying store read/write failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed stored bytes encountered on read, or an encode failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CoreError> for RegistryError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidMetadata(msg) => RegistryError::InvalidMetadata(msg),
            CoreError::UnknownField(raw) => RegistryError::InvalidField(raw),
            CoreError::MalformedHash(msg) => RegistryError::Serialization(msg),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
