use async_trait::async_trait;
use dashmap::DashMap;
use encore_core::error::{Result, StorageError};
use encore_core::{
    AdminStore, AdminUser, Booking, BookingRef, BookingStore, Employee, EmployeeId, EmployeeStore,
    NewAdminUser, NewEmployee, NewPayment, Payment, PaymentId,
};
use jiff::Timestamp;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct RosterState {
    employees: HashMap<i64, Employee>,
    payments: HashMap<i64, Payment>,
    admins: HashMap<i64, AdminUser>,
    next_employee_id: i64,
    next_payment_id: i64,
    next_admin_id: i64,
}

/// In-process implementation of the storage traits.
///
/// Bookings live in a `DashMap` keyed by reference; the entry API gives the
/// check-and-insert the same conflict semantics as the relational unique
/// index. Employees, payments and admins share a single mutex so the
/// cascading removal is one critical section rather than a transaction.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: DashMap<String, Booking>,
    roster: Mutex<RosterState>,
    #[cfg(any(test, feature = "fault-injection"))]
    fail_next_removal: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: makes the next cascading removal fail after the payments
    /// have been deleted, forcing the rollback path.
    #[cfg(any(test, feature = "fault-injection"))]
    pub fn inject_removal_fault(&self) {
        self.fail_next_removal
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    fn lock_roster(&self) -> Result<std::sync::MutexGuard<'_, RosterState>> {
        self.roster
            .lock()
            .map_err(|_| StorageError::Operation("roster lock poisoned".to_string()))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert(&self, booking: Booking) -> Result<()> {
        use dashmap::mapref::entry::Entry;

        match self.bookings.entry(booking.reference.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(booking.reference.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(booking);
                Ok(())
            }
        }
    }

    async fn get(&self, reference: &BookingRef) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .get(reference.as_str())
            .map(|entry| entry.clone()))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Booking>> {
        let mut matches: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| entry.phone == phone)
            .map(|entry| entry.clone())
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|entry| entry.clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, reference: &BookingRef) -> Result<bool> {
        Ok(self.bookings.remove(reference.as_str()).is_some())
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64> {
        // Counted inside the closure: inserts racing the sweep would skew a
        // before/after length diff.
        let mut removed = 0u64;
        self.bookings.retain(|_, booking| {
            let keep = booking.event_date >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        let mut roster = self.lock_roster()?;

        if roster
            .employees
            .values()
            .any(|existing| existing.username == employee.username)
        {
            return Err(StorageError::Conflict(employee.username));
        }

        roster.next_employee_id += 1;
        let id = roster.next_employee_id;
        let record = employee.into_employee(EmployeeId::new(id));
        roster.employees.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>> {
        let roster = self.lock_roster()?;
        Ok(roster
            .employees
            .values()
            .find(|employee| employee.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Employee>> {
        let roster = self.lock_roster()?;
        let mut all: Vec<Employee> = roster.employees.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(all)
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment> {
        let mut roster = self.lock_roster()?;

        // Ownership check and insert happen under the same lock, so a
        // concurrent cascading removal can never leave this payment behind.
        if !roster
            .employees
            .contains_key(&payment.employee_id.value())
        {
            return Err(StorageError::Operation(format!(
                "employee {} does not exist",
                payment.employee_id
            )));
        }

        roster.next_payment_id += 1;
        let id = roster.next_payment_id;
        let record = payment.into_payment(PaymentId::new(id));
        roster.payments.insert(id, record.clone());
        Ok(record)
    }

    async fn payments_for(&self, employee: EmployeeId) -> Result<Vec<Payment>> {
        let roster = self.lock_roster()?;
        let mut owned: Vec<Payment> = roster
            .payments
            .values()
            .filter(|payment| payment.employee_id == employee)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn delete_payment(&self, employee: EmployeeId, payment: PaymentId) -> Result<bool> {
        let mut roster = self.lock_roster()?;
        let owned = roster
            .payments
            .get(&payment.value())
            .is_some_and(|record| record.employee_id == employee);
        if !owned {
            return Ok(false);
        }
        roster.payments.remove(&payment.value());
        Ok(true)
    }

    async fn remove_with_payments(&self, employee: EmployeeId) -> Result<bool> {
        let mut roster = self.lock_roster()?;

        if !roster.employees.contains_key(&employee.value()) {
            return Ok(false);
        }

        let doomed: Vec<i64> = roster
            .payments
            .values()
            .filter(|payment| payment.employee_id == employee)
            .map(|payment| payment.id.value())
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for id in doomed {
            if let Some(payment) = roster.payments.remove(&id) {
                removed.push(payment);
            }
        }

        #[cfg(any(test, feature = "fault-injection"))]
        if self
            .fail_next_removal
            .swap(false, std::sync::atomic::Ordering::SeqCst)
        {
            // Roll back: put the payments back before reporting the failure.
            for payment in removed {
                roster.payments.insert(payment.id.value(), payment);
            }
            return Err(StorageError::Operation(
                "injected removal fault".to_string(),
            ));
        }

        roster.employees.remove(&employee.value());
        Ok(true)
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn insert(&self, admin: NewAdminUser) -> Result<AdminUser> {
        let mut roster = self.lock_roster()?;

        if roster
            .admins
            .values()
            .any(|existing| existing.username == admin.username)
        {
            return Err(StorageError::Conflict(admin.username));
        }

        roster.next_admin_id += 1;
        let id = roster.next_admin_id;
        let record = admin.into_admin(encore_core::AdminId::new(id));
        roster.admins.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let roster = self.lock_roster()?;
        Ok(roster
            .admins
            .values()
            .find(|admin| admin.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::NewBooking;
    use jiff::civil::Date;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::Arc;

    fn reference(value: &str) -> BookingRef {
        BookingRef::new_unchecked(value)
    }

    fn booking(value: &str, phone: &str, event_date: Timestamp, created_at: Timestamp) -> Booking {
        NewBooking {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: phone.to_string(),
            additional_phone: None,
            package_type: "premium".to_string(),
            event_date,
            venue: "Lakeside Hall".to_string(),
            city: "Pune".to_string(),
            customization: None,
            amount: 50_000,
            advance_payment: 10_000,
        }
        .into_booking(reference(value), created_at)
    }

    fn new_employee(username: &str, created_at: Timestamp) -> NewEmployee {
        NewEmployee {
            name: "Ravi Kumar".to_string(),
            mobile_number: "9999900000".to_string(),
            email: "ravi@example.com".to_string(),
            address: "12 Hill Road".to_string(),
            total_amount_to_be_paid: 20_000.0,
            total_amount_paid_in_advance: 5_000.0,
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at,
        }
    }

    fn new_payment(employee: EmployeeId, day: i8) -> NewPayment {
        NewPayment {
            amount_paid: 1_000.0,
            date: Date::new(2025, 6, day).unwrap(),
            employee_id: employee,
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn booking_insert_and_get() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        BookingStore::insert(&store, booking("ABC123", "111", now, now))
            .await
            .unwrap();

        let got = store.get(&reference("ABC123")).await.unwrap().unwrap();
        assert_eq!(got.reference.as_str(), "ABC123");
        assert!(got.phone_verified);
    }

    #[tokio::test]
    async fn booking_insert_conflict_on_taken_reference() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        BookingStore::insert(&store, booking("ABC123", "111", now, now))
            .await
            .unwrap();
        let err = BookingStore::insert(&store, booking("ABC123", "222", now, now))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn bookings_by_phone_come_newest_first() {
        let store = MemoryStore::new();
        let base = Timestamp::now();

        for (value, offset) in [("AAAAA1", 0), ("AAAAA2", 60), ("AAAAA3", 120)] {
            let created = base + SignedDuration::from_secs(offset);
            BookingStore::insert(&store, booking(value, "111", base, created))
                .await
                .unwrap();
        }
        BookingStore::insert(&store, booking("BBBBB1", "222", base, base))
            .await
            .unwrap();

        let found = store.find_by_phone("111").await.unwrap();
        let order: Vec<&str> = found.iter().map(|b| b.reference.as_str()).collect();
        assert_eq!(order, ["AAAAA3", "AAAAA2", "AAAAA1"]);
    }

    #[tokio::test]
    async fn delete_booking() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        BookingStore::insert(&store, booking("ABC123", "111", now, now))
            .await
            .unwrap();

        assert!(store.delete(&reference("ABC123")).await.unwrap());
        assert!(!store.delete(&reference("ABC123")).await.unwrap());
        assert!(store.get(&reference("ABC123")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_before_removes_only_past_events() {
        let store = MemoryStore::new();
        let cutoff = Timestamp::now();
        let past = cutoff - SignedDuration::from_hours(24);
        let future = cutoff + SignedDuration::from_hours(24);

        BookingStore::insert(&store, booking("PAST01", "111", past, cutoff))
            .await
            .unwrap();
        BookingStore::insert(&store, booking("FUTUR1", "111", future, cutoff))
            .await
            .unwrap();

        let removed = store.delete_before(cutoff).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get(&reference("PAST01")).await.unwrap().is_none());
        assert!(store.get(&reference("FUTUR1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_before_counts_removals_despite_concurrent_inserts() {
        let store = Arc::new(MemoryStore::new());
        let cutoff = Timestamp::now();
        let past = cutoff - SignedDuration::from_hours(24);
        let future = cutoff + SignedDuration::from_hours(24);

        for value in ["PAST01", "PAST02", "PAST03"] {
            BookingStore::insert(&*store, booking(value, "111", past, cutoff))
                .await
                .unwrap();
        }

        // Inserts racing the sweep must not skew the removed count.
        let mut handles = Vec::new();
        for value in ["FUTUR1", "FUTUR2", "FUTUR3", "FUTUR4", "FUTUR5"] {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                BookingStore::insert(&*store, booking(value, "222", future, cutoff))
                    .await
                    .unwrap();
            }));
        }
        let sweeper = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.delete_before(cutoff).await.unwrap() })
        };

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(sweeper.await.unwrap(), 3);
        assert_eq!(BookingStore::list(&*store).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn employee_insert_assigns_ids_and_rejects_duplicate_usernames() {
        let store = MemoryStore::new();
        let now = Timestamp::now();

        let first = EmployeeStore::insert(&store, new_employee("ravi", now))
            .await
            .unwrap();
        assert_eq!(first.id.value(), 1);
        assert!(first.is_employee);

        let err = EmployeeStore::insert(&store, new_employee("ravi", now))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let second = EmployeeStore::insert(&store, new_employee("meera", now))
            .await
            .unwrap();
        assert_eq!(second.id.value(), 2);
    }

    #[tokio::test]
    async fn payments_require_an_existing_owner() {
        let store = MemoryStore::new();

        let err = store
            .insert_payment(new_payment(EmployeeId::new(42), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Operation(_)));
    }

    #[tokio::test]
    async fn payments_come_newest_date_first() {
        let store = MemoryStore::new();
        let employee = EmployeeStore::insert(&store, new_employee("ravi", Timestamp::now()))
            .await
            .unwrap();

        for day in [3, 9, 6] {
            store
                .insert_payment(new_payment(employee.id, day))
                .await
                .unwrap();
        }

        let payments = store.payments_for(employee.id).await.unwrap();
        let days: Vec<i8> = payments.iter().map(|p| p.date.day()).collect();
        assert_eq!(days, [9, 6, 3]);
    }

    #[tokio::test]
    async fn delete_payment_is_scoped_to_its_owner() {
        let store = MemoryStore::new();
        let now = Timestamp::now();
        let owner = EmployeeStore::insert(&store, new_employee("ravi", now))
            .await
            .unwrap();
        let other = EmployeeStore::insert(&store, new_employee("meera", now))
            .await
            .unwrap();
        let payment = store
            .insert_payment(new_payment(owner.id, 1))
            .await
            .unwrap();

        // Wrong owner: nothing is deleted.
        assert!(!store.delete_payment(other.id, payment.id).await.unwrap());
        assert_eq!(store.payments_for(owner.id).await.unwrap().len(), 1);

        assert!(store.delete_payment(owner.id, payment.id).await.unwrap());
        assert!(store.payments_for(owner.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cascading_removal_deletes_employee_and_all_payments() {
        let store = MemoryStore::new();
        let employee = EmployeeStore::insert(&store, new_employee("ravi", Timestamp::now()))
            .await
            .unwrap();
        for day in [1, 2, 3] {
            store
                .insert_payment(new_payment(employee.id, day))
                .await
                .unwrap();
        }

        assert!(store.remove_with_payments(employee.id).await.unwrap());
        assert!(EmployeeStore::find_by_username(&store, "ravi")
            .await
            .unwrap()
            .is_none());
        assert!(store.payments_for(employee.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cascading_removal_of_unknown_employee_changes_nothing() {
        let store = MemoryStore::new();
        let employee = EmployeeStore::insert(&store, new_employee("ravi", Timestamp::now()))
            .await
            .unwrap();
        store
            .insert_payment(new_payment(employee.id, 1))
            .await
            .unwrap();

        assert!(!store
            .remove_with_payments(EmployeeId::new(999))
            .await
            .unwrap());
        assert!(EmployeeStore::find_by_username(&store, "ravi")
            .await
            .unwrap()
            .is_some());
        assert_eq!(store.payments_for(employee.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_removal_rolls_back_payment_deletion() {
        let store = MemoryStore::new();
        let employee = EmployeeStore::insert(&store, new_employee("ravi", Timestamp::now()))
            .await
            .unwrap();
        for day in [1, 2, 3] {
            store
                .insert_payment(new_payment(employee.id, day))
                .await
                .unwrap();
        }

        store.inject_removal_fault();
        let err = store.remove_with_payments(employee.id).await.unwrap_err();
        assert!(matches!(err, StorageError::Operation(_)));

        // Nothing was committed: the employee and all three payments remain.
        assert!(EmployeeStore::find_by_username(&store, "ravi")
            .await
            .unwrap()
            .is_some());
        assert_eq!(store.payments_for(employee.id).await.unwrap().len(), 3);

        // The fault is one-shot; the retry succeeds.
        assert!(store.remove_with_payments(employee.id).await.unwrap());
        assert!(store.payments_for(employee.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_payment_inserts_and_removal_leave_no_orphans() {
        let store = Arc::new(MemoryStore::new());
        let employee = EmployeeStore::insert(&*store, new_employee("ravi", Timestamp::now()))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            let id = employee.id;
            handles.push(tokio::spawn(async move {
                // Either lands before the removal (and is cascaded away) or
                // is rejected because the owner is already gone.
                let _ = store.insert_payment(new_payment(id, 1)).await;
            }));
        }
        {
            let store = Arc::clone(&store);
            let id = employee.id;
            handles.push(tokio::spawn(async move {
                assert!(store.remove_with_payments(id).await.unwrap());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(EmployeeStore::find_by_username(&*store, "ravi")
            .await
            .unwrap()
            .is_none());
        assert!(store.payments_for(employee.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_usernames_are_unique() {
        let store = MemoryStore::new();
        let now = Timestamp::now();
        let admin = NewAdminUser {
            name: "Nisha Shah".to_string(),
            mobile_number: "8888800000".to_string(),
            email: "nisha@example.com".to_string(),
            username: "nisha".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: now,
        };

        let created = AdminStore::insert(&store, admin.clone()).await.unwrap();
        assert!(created.is_admin);

        let err = AdminStore::insert(&store, admin).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let found = AdminStore::find_by_username(&store, "nisha")
            .await
            .unwrap();
        assert!(found.is_some());
    }
}
