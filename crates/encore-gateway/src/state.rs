use encore_booking::BookingService;
use encore_core::{AdminStore, BookingStore, EmployeeStore};
use encore_roster::RosterService;
use std::sync::Arc;

/// An adapter providing all three storage capabilities.
pub trait Store: BookingStore + EmployeeStore + AdminStore {}

impl<T: BookingStore + EmployeeStore + AdminStore> Store for T {}

/// Shared handler state. Both services borrow the same storage adapter.
pub struct AppState<S> {
    pub bookings: BookingService<S>,
    pub roster: RosterService<S, S>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            bookings: BookingService::new(store.clone()),
            roster: RosterService::new(store.clone(), store),
        }
    }
}

// Manual impl: `S` itself need not be `Clone`, the services share it by Arc.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            bookings: self.bookings.clone(),
            roster: self.roster.clone(),
        }
    }
}
