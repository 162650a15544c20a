use crate::error::{Result, RosterError};
use crate::password;
use encore_core::{
    AdminStore, AdminUser, Employee, EmployeeStore, NewAdminUser, NewEmployee, NewPayment,
    Payment, PaymentId,
};
use jiff::civil::Date;
use jiff::Timestamp;
use std::sync::Arc;
use tracing::info;

/// Input for registering an employee. The password arrives in plaintext and
/// is hashed before it reaches storage.
#[derive(Debug, Clone)]
pub struct EmployeeSignup {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub address: String,
    pub total_amount_to_be_paid: f64,
    pub total_amount_paid_in_advance: f64,
    pub username: String,
    pub password: String,
}

/// Input for registering an admin user.
#[derive(Debug, Clone)]
pub struct AdminSignup {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Service for employee and admin account management.
///
/// Both stores may be backed by the same adapter instance; the service only
/// sees the two capabilities.
#[derive(Debug)]
pub struct RosterService<E, A> {
    employees: Arc<E>,
    admins: Arc<A>,
}

// Manual impl: the stores are shared by Arc and need not be `Clone` themselves.
impl<E, A> Clone for RosterService<E, A> {
    fn clone(&self) -> Self {
        Self {
            employees: self.employees.clone(),
            admins: self.admins.clone(),
        }
    }
}

impl<E: EmployeeStore, A: AdminStore> RosterService<E, A> {
    pub fn new(employees: Arc<E>, admins: Arc<A>) -> Self {
        Self { employees, admins }
    }

    /// Registers an employee under a unique username.
    pub async fn create_employee(&self, signup: EmployeeSignup) -> Result<Employee> {
        let request = NewEmployee {
            name: signup.name,
            mobile_number: signup.mobile_number,
            email: signup.email,
            address: signup.address,
            total_amount_to_be_paid: signup.total_amount_to_be_paid,
            total_amount_paid_in_advance: signup.total_amount_paid_in_advance,
            username: signup.username,
            password_hash: password::hash_password(&signup.password)?,
            created_at: Timestamp::now(),
        };
        let employee = self.employees.insert(request).await?;
        info!(username = %employee.username, id = %employee.id, "employee created");
        Ok(employee)
    }

    /// Fetches every employee, newest first.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.list().await?)
    }

    /// Fetches an employee and the payments it owns, newest date first.
    pub async fn employee_detail(&self, username: &str) -> Result<(Employee, Vec<Payment>)> {
        let employee = self.require_employee(username).await?;
        let payments = self.employees.payments_for(employee.id).await?;
        Ok((employee, payments))
    }

    /// Records a payment for an existing employee.
    pub async fn add_payment(&self, username: &str, amount_paid: f64, date: Date) -> Result<Payment> {
        let employee = self.require_employee(username).await?;
        let payment = self
            .employees
            .insert_payment(NewPayment {
                amount_paid,
                date,
                employee_id: employee.id,
                created_at: Timestamp::now(),
            })
            .await?;
        info!(username, payment = %payment.id, amount_paid, "payment recorded");
        Ok(payment)
    }

    /// Deletes a single payment owned by the given employee.
    pub async fn delete_payment(&self, username: &str, payment: PaymentId) -> Result<()> {
        let employee = self.require_employee(username).await?;
        if self.employees.delete_payment(employee.id, payment).await? {
            info!(username, payment = %payment, "payment deleted");
            Ok(())
        } else {
            Err(RosterError::NotFound(format!(
                "payment {payment} for employee {username}"
            )))
        }
    }

    /// Removes an employee and every payment it owns as one atomic unit.
    ///
    /// Either the employee and all of its payments are gone, or nothing
    /// changed; the storage adapter rolls back on any mid-way failure.
    pub async fn remove_employee(&self, username: &str) -> Result<()> {
        let employee = self.require_employee(username).await?;
        if self.employees.remove_with_payments(employee.id).await? {
            info!(username, id = %employee.id, "employee removed with payments");
            Ok(())
        } else {
            // Deleted concurrently between the lookup and the removal.
            Err(RosterError::NotFound(format!("employee {username}")))
        }
    }

    /// Verifies employee credentials, returning the matching record.
    ///
    /// An unknown username and a wrong password both report
    /// [`RosterError::InvalidCredentials`].
    pub async fn verify_employee(&self, username: &str, pass: &str) -> Result<Employee> {
        let employee = self
            .employees
            .find_by_username(username)
            .await?
            .ok_or(RosterError::InvalidCredentials)?;
        if password::verify_password(pass, &employee.password_hash) {
            Ok(employee)
        } else {
            Err(RosterError::InvalidCredentials)
        }
    }

    /// Verifies admin credentials, returning the matching record.
    pub async fn verify_admin(&self, username: &str, pass: &str) -> Result<AdminUser> {
        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or(RosterError::InvalidCredentials)?;
        if password::verify_password(pass, &admin.password_hash) {
            Ok(admin)
        } else {
            Err(RosterError::InvalidCredentials)
        }
    }

    /// Registers an admin user. The username must be free among admins and
    /// employees alike.
    pub async fn create_admin(&self, signup: AdminSignup) -> Result<AdminUser> {
        if self
            .employees
            .find_by_username(&signup.username)
            .await?
            .is_some()
        {
            return Err(RosterError::UsernameTaken(signup.username));
        }
        let request = NewAdminUser {
            name: signup.name,
            mobile_number: signup.mobile_number,
            email: signup.email,
            username: signup.username,
            password_hash: password::hash_password(&signup.password)?,
            created_at: Timestamp::now(),
        };
        let admin = self.admins.insert(request).await?;
        info!(username = %admin.username, id = %admin.id, "admin created");
        Ok(admin)
    }

    async fn require_employee(&self, username: &str) -> Result<Employee> {
        self.employees
            .find_by_username(username)
            .await?
            .ok_or_else(|| RosterError::NotFound(format!("employee {username}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_storage::MemoryStore;

    fn test_service() -> RosterService<MemoryStore, MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        RosterService::new(store.clone(), store)
    }

    fn signup(username: &str) -> EmployeeSignup {
        EmployeeSignup {
            name: "Ravi Kumar".to_string(),
            mobile_number: "9876543210".to_string(),
            email: "ravi@example.com".to_string(),
            address: "12 MG Road".to_string(),
            total_amount_to_be_paid: 20_000.0,
            total_amount_paid_in_advance: 5_000.0,
            username: username.to_string(),
            password: "s3cret".to_string(),
        }
    }

    fn admin_signup(username: &str) -> AdminSignup {
        AdminSignup {
            name: "Priya Shah".to_string(),
            mobile_number: "9123456780".to_string(),
            email: "priya@example.com".to_string(),
            username: username.to_string(),
            password: "adm1n".to_string(),
        }
    }

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn create_employee_hashes_the_password() {
        let service = test_service();

        let employee = service.create_employee(signup("ravi")).await.unwrap();
        assert!(employee.is_employee);
        assert_ne!(employee.password_hash, "s3cret");
        assert!(employee.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let service = test_service();

        service.create_employee(signup("ravi")).await.unwrap();
        let err = service.create_employee(signup("ravi")).await.unwrap_err();
        assert!(matches!(err, RosterError::UsernameTaken(_)));
    }

    #[tokio::test]
    async fn employee_detail_includes_payments() {
        let service = test_service();
        service.create_employee(signup("ravi")).await.unwrap();

        service
            .add_payment("ravi", 3_000.0, date("2026-01-15"))
            .await
            .unwrap();
        service
            .add_payment("ravi", 2_000.0, date("2026-02-20"))
            .await
            .unwrap();

        let (employee, payments) = service.employee_detail("ravi").await.unwrap();
        assert_eq!(employee.username, "ravi");
        assert_eq!(payments.len(), 2);
        // Newest date first.
        assert_eq!(payments[0].date, date("2026-02-20"));
    }

    #[tokio::test]
    async fn add_payment_for_unknown_employee_fails() {
        let service = test_service();

        let err = service
            .add_payment("ghost", 1_000.0, date("2026-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_payment_is_scoped_to_its_owner() {
        let service = test_service();
        service.create_employee(signup("ravi")).await.unwrap();
        service.create_employee(signup("asha")).await.unwrap();

        let payment = service
            .add_payment("ravi", 3_000.0, date("2026-01-15"))
            .await
            .unwrap();

        // Another employee cannot delete it.
        let err = service
            .delete_payment("asha", payment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));

        service.delete_payment("ravi", payment.id).await.unwrap();
        let (_, payments) = service.employee_detail("ravi").await.unwrap();
        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn remove_employee_cascades_to_payments() {
        let service = test_service();
        service.create_employee(signup("ravi")).await.unwrap();
        service
            .add_payment("ravi", 3_000.0, date("2026-01-15"))
            .await
            .unwrap();

        service.remove_employee("ravi").await.unwrap();

        let err = service.employee_detail("ravi").await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_unknown_employee_reports_not_found() {
        let service = test_service();

        let err = service.remove_employee("ghost").await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)));
    }

    #[tokio::test]
    async fn verify_employee_accepts_the_right_password_only() {
        let service = test_service();
        service.create_employee(signup("ravi")).await.unwrap();

        let employee = service.verify_employee("ravi", "s3cret").await.unwrap();
        assert_eq!(employee.username, "ravi");

        let err = service.verify_employee("ravi", "wrong").await.unwrap_err();
        assert!(matches!(err, RosterError::InvalidCredentials));

        let err = service.verify_employee("ghost", "s3cret").await.unwrap_err();
        assert!(matches!(err, RosterError::InvalidCredentials));
    }

    #[tokio::test]
    async fn verify_admin_accepts_the_right_password_only() {
        let service = test_service();
        service.create_admin(admin_signup("priya")).await.unwrap();

        let admin = service.verify_admin("priya", "adm1n").await.unwrap();
        assert!(admin.is_admin);

        let err = service.verify_admin("priya", "wrong").await.unwrap_err();
        assert!(matches!(err, RosterError::InvalidCredentials));
    }

    #[tokio::test]
    async fn admin_username_must_be_free_among_employees_too() {
        let service = test_service();
        service.create_employee(signup("ravi")).await.unwrap();

        let err = service
            .create_admin(admin_signup("ravi"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::UsernameTaken(_)));

        service.create_admin(admin_signup("priya")).await.unwrap();
        let err = service
            .create_admin(admin_signup("priya"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::UsernameTaken(_)));
    }
}
