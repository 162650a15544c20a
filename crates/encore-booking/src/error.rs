use encore_core::StorageError;
use thiserror::Error;

/// Result type for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    /// Every attempt collided with an existing reference. Transient: the
    /// caller may retry the whole request.
    #[error("could not allocate a unique booking reference in {attempts} attempts")]
    ReferenceSpaceExhausted { attempts: u32 },
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),
    #[error("booking not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<encore_refgen::Error> for BookingError {
    fn from(value: encore_refgen::Error) -> Self {
        match value {
            encore_refgen::Error::RandomSourceUnavailable(message) => {
                Self::RandomSourceUnavailable(message)
            }
        }
    }
}

impl From<StorageError> for BookingError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}
