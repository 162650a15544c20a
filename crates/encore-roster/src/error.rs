use encore_core::StorageError;

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors that can occur during roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// No record exists for the given handle.
    #[error("not found: {0}")]
    NotFound(String),

    /// The username is already claimed by another account.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// The username/password pair did not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing or verification failed.
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// The underlying storage failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for RosterError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Conflict(username) => RosterError::UsernameTaken(username),
            other => RosterError::Storage(other.to_string()),
        }
    }
}
