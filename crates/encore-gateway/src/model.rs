use encore_core::{AdminUser, Booking, Employee, NewBooking, Payment};
use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct BookRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub additional_phone: Option<String>,
    pub package_type: String,
    pub event_date: Timestamp,
    pub venue: String,
    pub city: String,
    pub customization: Option<String>,
    pub amount: i64,
    pub advance_payment: i64,
}

impl From<BookRequest> for NewBooking {
    fn from(r: BookRequest) -> Self {
        NewBooking {
            name: r.name,
            email: r.email,
            phone: r.phone,
            additional_phone: r.additional_phone,
            package_type: r.package_type,
            event_date: r.event_date,
            venue: r.venue,
            city: r.city,
            customization: r.customization,
            amount: r.amount,
            advance_payment: r.advance_payment,
        }
    }
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub reference: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub additional_phone: Option<String>,
    pub package_type: String,
    pub event_date: Timestamp,
    pub venue: String,
    pub city: String,
    pub customization: Option<String>,
    pub amount: i64,
    pub advance_payment: i64,
    pub phone_verified: bool,
    pub created_at: Timestamp,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            reference: b.reference.to_string(),
            name: b.name,
            email: b.email,
            phone: b.phone,
            additional_phone: b.additional_phone,
            package_type: b.package_type,
            event_date: b.event_date,
            venue: b.venue,
            city: b.city,
            customization: b.customization,
            amount: b.amount,
            advance_payment: b.advance_payment,
            phone_verified: b.phone_verified,
            created_at: b.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct PastBookingsResponse {
    pub removed: u64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub address: String,
    pub total_amount_to_be_paid: f64,
    pub total_amount_paid_in_advance: f64,
    pub username: String,
    pub password: String,
}

/// Employee profile as exposed over the API. The password hash never
/// leaves the backend.
#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub address: String,
    pub is_employee: bool,
    pub total_amount_to_be_paid: f64,
    pub total_amount_paid_in_advance: f64,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        EmployeeResponse {
            id: e.id.value(),
            name: e.name,
            mobile_number: e.mobile_number,
            email: e.email,
            address: e.address,
            is_employee: e.is_employee,
            total_amount_to_be_paid: e.total_amount_to_be_paid,
            total_amount_paid_in_advance: e.total_amount_paid_in_advance,
            username: e.username,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    pub payments: Vec<PaymentResponse>,
}

#[derive(Deserialize)]
pub struct AddPaymentRequest {
    pub amount_paid: f64,
    pub date: Date,
}

#[derive(Serialize)]
pub struct PaymentResponse {
    pub id: i64,
    pub amount_paid: f64,
    pub date: Date,
    pub employee_id: i64,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        PaymentResponse {
            id: p.id.value(),
            amount_paid: p.amount_paid,
            date: p.date,
            employee_id: p.employee_id.value(),
            created_at: p.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminResponse {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AdminUser> for AdminResponse {
    fn from(a: AdminUser) -> Self {
        AdminResponse {
            id: a.id.value(),
            name: a.name,
            mobile_number: a.mobile_number,
            email: a.email,
            username: a.username,
            is_admin: a.is_admin,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
