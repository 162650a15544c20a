//! Core types and traits for the Encore booking backend.
//!
//! This crate provides the shared domain records, the validated booking
//! reference newtype, and the storage capability traits implemented by the
//! interchangeable adapters in `encore-storage`.

pub mod booking;
pub mod error;
pub mod reference;
pub mod roster;
pub mod store;

pub use booking::{Booking, NewBooking};
pub use error::{ReferenceError, StorageError};
pub use reference::BookingRef;
pub use roster::{
    AdminId, AdminUser, Employee, EmployeeId, NewAdminUser, NewEmployee, NewPayment, Payment,
    PaymentId,
};
pub use store::{AdminStore, BookingStore, EmployeeStore};
