use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! surrogate_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(
    /// Surrogate key for an employee record.
    EmployeeId
);
surrogate_id!(
    /// Surrogate key for a payment record.
    PaymentId
);
surrogate_id!(
    /// Surrogate key for an admin user record.
    AdminId
);

/// A staff record. Owns zero or more [`Payment`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub address: String,
    pub is_employee: bool,
    pub total_amount_to_be_paid: f64,
    pub total_amount_paid_in_advance: f64,
    /// Unique across all employees; the external handle for this record.
    pub username: String,
    /// Argon2 PHC string. Never serialized into API responses.
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating an employee. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub address: String,
    pub total_amount_to_be_paid: f64,
    pub total_amount_paid_in_advance: f64,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl NewEmployee {
    /// Builds the stored record once the store has assigned an id.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            mobile_number: self.mobile_number,
            email: self.email,
            address: self.address,
            is_employee: true,
            total_amount_to_be_paid: self.total_amount_to_be_paid,
            total_amount_paid_in_advance: self.total_amount_paid_in_advance,
            username: self.username,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// A payment made to an employee.
///
/// Exclusively owned: a payment never outlives the employee it references,
/// which the cascading delete in the storage adapters guarantees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount_paid: f64,
    /// Calendar date the payment was made, as reported by the admin.
    pub date: Date,
    pub employee_id: EmployeeId,
    pub created_at: Timestamp,
}

/// Input for recording a payment. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub amount_paid: f64,
    pub date: Date,
    pub employee_id: EmployeeId,
    pub created_at: Timestamp,
}

impl NewPayment {
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            amount_paid: self.amount_paid,
            date: self.date,
            employee_id: self.employee_id,
            created_at: self.created_at,
        }
    }
}

/// An administrator account. Flat flag only, no role model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminId,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating an admin user. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdminUser {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl NewAdminUser {
    pub fn into_admin(self, id: AdminId) -> AdminUser {
        AdminUser {
            id,
            name: self.name,
            mobile_number: self.mobile_number,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
            is_admin: true,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
