//! Collision-avoiding booking-reference generator.
//!
//! Produces fixed-length references drawn uniformly from the 36-symbol
//! alphabet in `encore-core`, using a cryptographically secure byte source
//! and rejection sampling to eliminate modulo bias. Uniqueness against
//! existing bookings is the caller's concern (`encore-booking` retries on
//! storage conflicts).

pub mod error;
mod generator;
mod source;

pub use error::Error;
pub use generator::RefGenerator;
pub use source::{RandomSource, SystemRandom};
