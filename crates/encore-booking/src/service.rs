use crate::error::{BookingError, Result};
use encore_refgen::{RandomSource, RefGenerator, SystemRandom};
use encore_core::{Booking, BookingRef, BookingStore, NewBooking, StorageError};
use jiff::tz::TimeZone;
use jiff::Timestamp;
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on allocate-and-insert attempts for one booking.
pub const MAX_REFERENCE_ATTEMPTS: u32 = 5;

/// Service for the booking lifecycle.
///
/// Reference uniqueness is enforced by the store's unique constraint: each
/// attempt generates a fresh reference and inserts optimistically, treating
/// a constraint violation as a collision. The check and the insert are one
/// atomic step, so concurrent requests can never both claim the same
/// reference.
#[derive(Debug)]
pub struct BookingService<B, S: RandomSource = SystemRandom> {
    store: Arc<B>,
    generator: RefGenerator<S>,
}

// Manual impl: the store is shared by Arc and need not be `Clone` itself.
impl<B, S: RandomSource + Clone> Clone for BookingService<B, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            generator: self.generator.clone(),
        }
    }
}

impl<B: BookingStore> BookingService<B> {
    /// Creates a service backed by the OS CSPRNG.
    pub fn new(store: Arc<B>) -> Self {
        Self::with_generator(store, RefGenerator::new())
    }
}

impl<B: BookingStore, S: RandomSource> BookingService<B, S> {
    /// Creates a service with a custom reference generator.
    pub fn with_generator(store: Arc<B>, generator: RefGenerator<S>) -> Self {
        Self { store, generator }
    }

    /// Creates a booking under a freshly allocated unique reference.
    pub async fn create(&self, request: NewBooking) -> Result<Booking> {
        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            let reference = self.generator.generate()?;
            let booking = request
                .clone()
                .into_booking(reference.clone(), Timestamp::now());

            match self.store.insert(booking.clone()).await {
                Ok(()) => {
                    info!(reference = %reference, name = %booking.name, "booking created");
                    return Ok(booking);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(attempt, reference = %reference, "reference collision, redrawing");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(BookingError::ReferenceSpaceExhausted {
            attempts: MAX_REFERENCE_ATTEMPTS,
        })
    }

    /// Fetches a booking by its reference.
    pub async fn fetch(&self, reference: &BookingRef) -> Result<Option<Booking>> {
        Ok(self.store.get(reference).await?)
    }

    /// Fetches all bookings made under a contact number, newest first.
    pub async fn fetch_by_phone(&self, phone: &str) -> Result<Vec<Booking>> {
        Ok(self.store.find_by_phone(phone).await?)
    }

    /// Fetches every booking, newest first.
    pub async fn list(&self) -> Result<Vec<Booking>> {
        Ok(self.store.list().await?)
    }

    /// Deletes a booking by reference.
    pub async fn delete(&self, reference: &BookingRef) -> Result<()> {
        if self.store.delete(reference).await? {
            info!(reference = %reference, "booking deleted");
            Ok(())
        } else {
            Err(BookingError::NotFound(reference.to_string()))
        }
    }

    /// Deletes every booking whose event predates the start of today,
    /// returning the number of removed records.
    pub async fn delete_past(&self) -> Result<u64> {
        let cutoff = start_of_today()?;
        let removed = self.store.delete_before(cutoff).await?;
        info!(removed, "past bookings deleted");
        Ok(removed)
    }
}

/// Midnight of the current day in the server's time zone.
fn start_of_today() -> Result<Timestamp> {
    let today = Timestamp::now()
        .to_zoned(TimeZone::system())
        .start_of_day()
        .map_err(|e| BookingError::Storage(format!("cannot determine start of today: {e}")))?;
    Ok(today.timestamp())
}
