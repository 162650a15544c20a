//! Storage adapters for the Encore booking backend.
//!
//! Two interchangeable implementations of the capability traits in
//! `encore-core`: [`MemoryStore`] (in-process, document-style) and
//! [`MySqlStore`] (relational, sqlx). Handler and service code only ever
//! sees the traits, so the adapters can be swapped at startup.

pub mod memory;
pub mod mysql;

pub use encore_core::{AdminStore, BookingStore, EmployeeStore, StorageError};
pub use memory::MemoryStore;
pub use mysql::MySqlStore;
