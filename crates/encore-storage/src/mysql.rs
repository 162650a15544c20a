use async_trait::async_trait;
use encore_core::error::{Result, StorageError};
use encore_core::{
    AdminId, AdminStore, AdminUser, Booking, BookingRef, BookingStore, Employee, EmployeeId,
    EmployeeStore, NewAdminUser, NewEmployee, NewPayment, Payment, PaymentId,
};
use jiff::civil::Date;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the storage traits.
///
/// Uniqueness of booking references and usernames is enforced by unique
/// indexes; a violation surfaces as `StorageError::Conflict` so the service
/// layer can treat it as a collision. The cascading employee removal runs in
/// a single transaction; sqlx rolls an uncommitted transaction back on drop,
/// so every early return on the error path leaves the tables untouched.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the schema if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        for ddl in [
            include_str!("../ddl/mysql/bookings.sql"),
            include_str!("../ddl/mysql/employees.sql"),
            include_str!("../ddl/mysql/payments.sql"),
            include_str!("../ddl/mysql/admin_users.sql"),
        ] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        }
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_timestamp(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds)
        .map_err(|e| StorageError::InvalidData(format!("invalid timestamp '{}': {e}", seconds)))
}

fn parse_date(value: &str) -> Result<Date> {
    value
        .parse::<Date>()
        .map_err(|e| StorageError::InvalidData(format!("invalid payment date '{}': {e}", value)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_foreign_key_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn booking_from_row(row: &MySqlRow) -> Result<Booking> {
    let reference: String = row.try_get("reference").map_err(map_sqlx_error)?;
    let event_date: i64 = row.try_get("event_date").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Booking {
        reference: BookingRef::new_unchecked(reference),
        name: row.try_get("name").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
        phone: row.try_get("phone").map_err(map_sqlx_error)?,
        additional_phone: row.try_get("additional_phone").map_err(map_sqlx_error)?,
        package_type: row.try_get("package_type").map_err(map_sqlx_error)?,
        event_date: parse_timestamp(event_date)?,
        venue: row.try_get("venue").map_err(map_sqlx_error)?,
        city: row.try_get("city").map_err(map_sqlx_error)?,
        customization: row.try_get("customization").map_err(map_sqlx_error)?,
        amount: row.try_get("amount").map_err(map_sqlx_error)?,
        advance_payment: row.try_get("advance_payment").map_err(map_sqlx_error)?,
        phone_verified: row.try_get("phone_verified").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(created_at)?,
    })
}

fn employee_from_row(row: &MySqlRow) -> Result<Employee> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;

    Ok(Employee {
        id: EmployeeId::new(id),
        name: row.try_get("name").map_err(map_sqlx_error)?,
        mobile_number: row.try_get("mobile_number").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
        address: row.try_get("address").map_err(map_sqlx_error)?,
        is_employee: row.try_get("is_employee").map_err(map_sqlx_error)?,
        total_amount_to_be_paid: row
            .try_get("total_amount_to_be_paid")
            .map_err(map_sqlx_error)?,
        total_amount_paid_in_advance: row
            .try_get("total_amount_paid_in_advance")
            .map_err(map_sqlx_error)?,
        username: row.try_get("username").map_err(map_sqlx_error)?,
        password_hash: row.try_get("password_hash").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    })
}

fn payment_from_row(row: &MySqlRow) -> Result<Payment> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let paid_on: String = row.try_get("paid_on").map_err(map_sqlx_error)?;
    let employee_id: i64 = row.try_get("employee_id").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(Payment {
        id: PaymentId::new(id),
        amount_paid: row.try_get("amount_paid").map_err(map_sqlx_error)?,
        date: parse_date(&paid_on)?,
        employee_id: EmployeeId::new(employee_id),
        created_at: parse_timestamp(created_at)?,
    })
}

fn admin_from_row(row: &MySqlRow) -> Result<AdminUser> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;

    Ok(AdminUser {
        id: AdminId::new(id),
        name: row.try_get("name").map_err(map_sqlx_error)?,
        mobile_number: row.try_get("mobile_number").map_err(map_sqlx_error)?,
        email: row.try_get("email").map_err(map_sqlx_error)?,
        username: row.try_get("username").map_err(map_sqlx_error)?,
        password_hash: row.try_get("password_hash").map_err(map_sqlx_error)?,
        is_admin: row.try_get("is_admin").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    })
}

#[async_trait]
impl BookingStore for MySqlStore {
    async fn insert(&self, booking: Booking) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (
                reference, name, email, phone, additional_phone, package_type,
                event_date, venue, city, customization, amount,
                advance_payment, phone_verified, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.reference.as_str())
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.additional_phone)
        .bind(&booking.package_type)
        .bind(booking.event_date.as_second())
        .bind(&booking.venue)
        .bind(&booking.city)
        .bind(&booking.customization)
        .bind(booking.amount)
        .bind(booking.advance_payment)
        .bind(booking.phone_verified)
        .bind(booking.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(booking.reference.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn get(&self, reference: &BookingRef) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT * FROM bookings WHERE reference = ? LIMIT 1
            "#,
        )
        .bind(reference.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(booking_from_row).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM bookings WHERE phone = ? ORDER BY created_at DESC
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM bookings ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(booking_from_row).collect()
    }

    async fn delete(&self, reference: &BookingRef) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM bookings WHERE reference = ?
            "#,
        )
        .bind(reference.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64> {
        // Native integer comparison on stored Unix seconds.
        let result = sqlx::query(
            r#"
            DELETE FROM bookings WHERE event_date < ?
            "#,
        )
        .bind(cutoff.as_second())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (
                name, mobile_number, email, address, is_employee,
                total_amount_to_be_paid, total_amount_paid_in_advance,
                username, password_hash, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, TRUE, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.mobile_number)
        .bind(&employee.email)
        .bind(&employee.address)
        .bind(employee.total_amount_to_be_paid)
        .bind(employee.total_amount_paid_in_advance)
        .bind(&employee.username)
        .bind(&employee.password_hash)
        .bind(employee.created_at.as_second())
        .bind(employee.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(employee.into_employee(EmployeeId::new(done.last_insert_id() as i64))),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(employee.username))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT * FROM employees WHERE username = ? LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(employee_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM employees ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(employee_from_row).collect()
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (amount_paid, paid_on, employee_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(payment.amount_paid)
        .bind(payment.date.to_string())
        .bind(payment.employee_id.value())
        .bind(payment.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(payment.into_payment(PaymentId::new(done.last_insert_id() as i64))),
            // The foreign key rejects payments whose owner vanished between
            // username resolution and this insert; no orphan is ever stored.
            Err(err) if is_foreign_key_violation(&err) => Err(StorageError::Operation(format!(
                "employee {} does not exist",
                payment.employee_id
            ))),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn payments_for(&self, employee: EmployeeId) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM payments
            WHERE employee_id = ?
            ORDER BY paid_on DESC, id DESC
            "#,
        )
        .bind(employee.value())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(payment_from_row).collect()
    }

    async fn delete_payment(&self, employee: EmployeeId, payment: PaymentId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM payments WHERE id = ? AND employee_id = ?
            "#,
        )
        .bind(payment.value())
        .bind(employee.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_with_payments(&self, employee: EmployeeId) -> Result<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            DELETE FROM payments WHERE employee_id = ?
            "#,
        )
        .bind(employee.value())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM employees WHERE id = ?
            "#,
        )
        .bind(employee.value())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // Employee vanished under us; undo the payment scan too.
            tx.rollback().await.map_err(map_sqlx_error)?;
            return Ok(false);
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(true)
    }
}

#[async_trait]
impl AdminStore for MySqlStore {
    async fn insert(&self, admin: NewAdminUser) -> Result<AdminUser> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (
                name, mobile_number, email, username, password_hash,
                is_admin, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, TRUE, ?, ?)
            "#,
        )
        .bind(&admin.name)
        .bind(&admin.mobile_number)
        .bind(&admin.email)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at.as_second())
        .bind(admin.created_at.as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(admin.into_admin(AdminId::new(done.last_insert_id() as i64))),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(admin.username)),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let row = sqlx::query(
            r#"
            SELECT * FROM admin_users WHERE username = ? LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(admin_from_row).transpose()
    }
}
