mod auth;
mod booking;
mod health;
mod roster;

pub use auth::{admin_login_handler, login_handler};
pub use booking::{
    book_handler, delete_booking_handler, delete_past_bookings_handler, get_booking_handler,
    list_bookings_handler, search_bookings_handler,
};
pub use health::health_handler;
pub use roster::{
    add_payment_handler, create_admin_handler, create_employee_handler, delete_employee_handler,
    delete_payment_handler, get_employee_handler, list_employees_handler,
};
