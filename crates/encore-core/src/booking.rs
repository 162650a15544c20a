use crate::reference::BookingRef;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored booking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The customer-facing booking reference.
    pub reference: BookingRef,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub additional_phone: Option<String>,
    pub package_type: String,
    /// When the booked event takes place.
    pub event_date: Timestamp,
    pub venue: String,
    pub city: String,
    pub customization: Option<String>,
    /// Agreed total, in whole currency units.
    pub amount: i64,
    pub advance_payment: i64,
    pub phone_verified: bool,
    pub created_at: Timestamp,
}

/// Input for creating a booking, before a reference has been allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
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

impl NewBooking {
    /// Builds the full record once a reference has been allocated.
    ///
    /// Phone verification happened upstream before the request reached us,
    /// so the stored record is always marked verified.
    pub fn into_booking(self, reference: BookingRef, created_at: Timestamp) -> Booking {
        Booking {
            reference,
            name: self.name,
            email: self.email,
            phone: self.phone,
            additional_phone: self.additional_phone,
            package_type: self.package_type,
            event_date: self.event_date,
            venue: self.venue,
            city: self.city,
            customization: self.customization,
            amount: self.amount,
            advance_payment: self.advance_payment,
            phone_verified: true,
            created_at,
        }
    }
}
