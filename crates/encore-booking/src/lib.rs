//! Booking service implementation.
//!
//! This crate wraps a [`BookingStore`](encore_core::BookingStore) and a
//! reference generator to handle unique-reference acquisition and the
//! booking lifecycle. Core types are re-exported from `encore_core`.

pub mod error;
pub mod service;

pub use error::BookingError;
pub use service::{BookingService, MAX_REFERENCE_ATTEMPTS};
