//! Employee and admin roster management.
//!
//! This crate wraps an [`EmployeeStore`](encore_core::EmployeeStore) and an
//! [`AdminStore`](encore_core::AdminStore) to handle account creation,
//! credential verification, payment recording, and the cascading removal of
//! an employee together with every payment it owns.

pub mod error;
pub mod password;
pub mod service;

pub use error::RosterError;
pub use service::{AdminSignup, EmployeeSignup, RosterService};
