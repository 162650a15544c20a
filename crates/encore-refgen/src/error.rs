use thiserror::Error;

/// Errors returned by reference generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The secure random source failed. Generation must not fall back to a
    /// non-cryptographic source, so this is fatal to the current request.
    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}
