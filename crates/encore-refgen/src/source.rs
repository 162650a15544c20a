use crate::error::Error;
use rand::rngs::OsRng;
use rand::RngCore;

/// A source of cryptographically secure random bytes.
///
/// The generator draws one byte at a time through this trait, so
/// implementations must be cheap to call repeatedly. Implementations that
/// cannot guarantee CSPRNG-grade output must not exist: callers rely on this
/// trait for unpredictability of booking references.
pub trait RandomSource: Send + Sync {
    /// Fills `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| Error::RandomSourceUnavailable(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_source {
    use super::RandomSource;
    use crate::error::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed byte script, one byte per request.
    pub(crate) struct ScriptedSource {
        bytes: Mutex<VecDeque<u8>>,
    }

    impl ScriptedSource {
        pub(crate) fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
            Self {
                bytes: Mutex::new(bytes.into_iter().collect()),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn fill(&self, buf: &mut [u8]) -> Result<(), Error> {
            let mut bytes = self
                .bytes
                .lock()
                .expect("scripted source lock should not be poisoned");
            for slot in buf.iter_mut() {
                *slot = bytes.pop_front().expect("scripted source ran out of bytes");
            }
            Ok(())
        }
    }

    /// Always fails, as a source with no entropy available would.
    pub(crate) struct BrokenSource;

    impl RandomSource for BrokenSource {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), Error> {
            Err(Error::RandomSourceUnavailable(
                "entropy pool unavailable".to_string(),
            ))
        }
    }
}
