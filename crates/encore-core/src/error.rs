use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors surfaced by the storage adapters.
///
/// `Conflict` is the only variant with business meaning: it reports a
/// unique-constraint violation (booking reference or username already taken)
/// and callers may react to it. Everything else is an internal failure that
/// must not leave partial state behind.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ReferenceError {
    #[error("invalid booking reference: {0}")]
    Invalid(String),
}
