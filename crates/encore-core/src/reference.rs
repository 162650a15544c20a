use crate::error::ReferenceError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 36-symbol alphabet booking references are drawn from.
///
/// Uppercase-only so a reference can be read aloud over the phone without
/// case ambiguity.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a booking reference.
pub const REFERENCE_LEN: usize = 6;

/// A validated booking reference.
///
/// References are exactly [`REFERENCE_LEN`] characters, each drawn from
/// [`ALPHABET`]. Uniqueness is enforced by the storage layer, not here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingRef(String);

impl BookingRef {
    /// Parses a booking reference, normalising lowercase input.
    ///
    /// Customers type references back to us, so `abc123` is accepted and
    /// canonicalised to `ABC123`.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ReferenceError> {
        let canonical = value.as_ref().trim().to_ascii_uppercase();
        Self::validate(&canonical)?;
        Ok(Self(canonical))
    }

    /// Wraps a reference produced by a trusted internal source.
    ///
    /// Use this only for output of the reference generator, which is
    /// guaranteed to draw from the alphabet.
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), ReferenceError> {
        if value.len() != REFERENCE_LEN {
            return Err(ReferenceError::Invalid(format!(
                "length must be {}, got {}",
                REFERENCE_LEN,
                value.len()
            )));
        }

        if !value.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ReferenceError::Invalid(format!(
                "must contain only A-Z and 0-9: '{}'",
                value
            )));
        }

        Ok(())
    }
}

impl Display for BookingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BookingRef {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BookingRef> for String {
    fn from(value: BookingRef) -> Self {
        value.0
    }
}
