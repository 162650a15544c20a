use crate::booking::Booking;
use crate::error::Result;
use crate::reference::BookingRef;
use crate::roster::{
    AdminUser, Employee, EmployeeId, NewAdminUser, NewEmployee, NewPayment, Payment, PaymentId,
};
use async_trait::async_trait;
use jiff::Timestamp;

/// Storage capability for booking records.
///
/// Adapters must enforce a uniqueness constraint on the booking reference;
/// `insert` reports a violation as [`StorageError::Conflict`] so callers can
/// treat it as a reference collision and retry with a fresh draw.
///
/// [`StorageError::Conflict`]: crate::error::StorageError::Conflict
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Inserts a booking. Returns `Err(Conflict)` if the reference is taken.
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// Fetches a booking by reference. `None` if absent.
    async fn get(&self, reference: &BookingRef) -> Result<Option<Booking>>;

    /// Fetches all bookings for a contact number, newest first.
    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Booking>>;

    /// Fetches all bookings, newest first.
    async fn list(&self) -> Result<Vec<Booking>>;

    /// Deletes a booking by reference. `true` if a record was removed.
    async fn delete(&self, reference: &BookingRef) -> Result<bool>;

    /// Deletes every booking whose event date is strictly before `cutoff`,
    /// returning the number of removed records.
    ///
    /// Adapters compare timestamps natively (integer seconds or engine
    /// datetime), never as formatted text.
    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64>;
}

/// Storage capability for employees and their payments.
#[async_trait]
pub trait EmployeeStore: Send + Sync + 'static {
    /// Inserts an employee and assigns its id.
    /// Returns `Err(Conflict)` if the username is taken.
    async fn insert(&self, employee: NewEmployee) -> Result<Employee>;

    /// Resolves a username to its employee record. `None` if absent.
    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>>;

    /// Fetches all employees, newest first.
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Records a payment for an existing employee and assigns its id.
    ///
    /// Fails if the owning employee does not exist at insertion time; a
    /// payment must never be created as an orphan.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment>;

    /// Fetches the payments owned by an employee, newest date first.
    async fn payments_for(&self, employee: EmployeeId) -> Result<Vec<Payment>>;

    /// Deletes a single payment, scoped to its owning employee.
    /// `true` if a record was removed.
    async fn delete_payment(&self, employee: EmployeeId, payment: PaymentId) -> Result<bool>;

    /// Deletes an employee together with all of its payments as one atomic
    /// unit. `true` if the employee existed.
    ///
    /// On any failure mid-way the adapter rolls back fully: an observer must
    /// never see the employee gone with payments remaining, or payments gone
    /// with the employee still present.
    async fn remove_with_payments(&self, employee: EmployeeId) -> Result<bool>;
}

/// Storage capability for admin users.
#[async_trait]
pub trait AdminStore: Send + Sync + 'static {
    /// Inserts an admin user and assigns its id.
    /// Returns `Err(Conflict)` if the username is taken.
    async fn insert(&self, admin: NewAdminUser) -> Result<AdminUser>;

    /// Resolves a username to its admin record. `None` if absent.
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>>;
}
