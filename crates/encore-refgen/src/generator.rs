use crate::error::Error;
use crate::source::{RandomSource, SystemRandom};
use encore_core::reference::{ALPHABET, REFERENCE_LEN};
use encore_core::BookingRef;

const ALPHABET_LEN: u8 = ALPHABET.len() as u8;

/// Largest multiple of the alphabet size that fits in a byte.
///
/// `256 mod 36 = 4`, so a plain `byte % 36` would map the four bytes
/// 252..=255 onto the first four symbols a second time, skewing them by
/// ~1/64. Bytes at or above this bound are redrawn instead.
const REJECTION_BOUND: u8 = ((256 / ALPHABET.len()) * ALPHABET.len()) as u8;

/// Generates booking references from a secure random source.
///
/// Each symbol is drawn independently and uniformly from the alphabet via
/// rejection sampling. The generator is stateless apart from its source and
/// performs no storage lookups.
#[derive(Debug, Clone)]
pub struct RefGenerator<S: RandomSource = SystemRandom> {
    source: S,
}

impl RefGenerator<SystemRandom> {
    /// Creates a generator backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self::with_source(SystemRandom)
    }
}

impl Default for RefGenerator<SystemRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RandomSource> RefGenerator<S> {
    /// Creates a generator with a custom byte source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Generates one booking reference.
    pub fn generate(&self) -> Result<BookingRef, Error> {
        let mut out = [0u8; REFERENCE_LEN];
        for slot in out.iter_mut() {
            *slot = ALPHABET[usize::from(self.draw_index()?)];
        }

        // The alphabet is pure ASCII, so the buffer is valid UTF-8.
        let reference = std::str::from_utf8(&out)
            .map_err(|e| Error::RandomSourceUnavailable(e.to_string()))?;
        Ok(BookingRef::new_unchecked(reference))
    }

    /// Draws a uniform index into the alphabet, redrawing biased bytes.
    fn draw_index(&self) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        loop {
            self.source.fill(&mut byte)?;
            if byte[0] < REJECTION_BOUND {
                return Ok(byte[0] % ALPHABET_LEN);
            }
        }
    }
}
