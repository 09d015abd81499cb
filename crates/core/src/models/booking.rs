use serde::{Deserialize, Serialize};

use crate::calendar::{Date, Slot};

/// A contiguous slot range reserved by one actor in one room on one day.
///
/// The room id is implied by the enclosing reservation on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    #[serde(skip)]
    pub room_id: String,
    pub date: Date,
    pub start: Slot,
    pub end: Slot,
    pub reserved_by: String,
}

impl Booking {
    /// One storage row per slot of the booking, in slot order.
    pub fn rows(&self) -> Vec<SlotRow> {
        self.start
            .through(self.end)
            .map(|slot| SlotRow {
                booking_id: self.booking_id.clone(),
                room_id: self.room_id.clone(),
                date: self.date,
                slot,
                reserved_by: self.reserved_by.clone(),
            })
            .collect()
    }
}

/// A single persisted slot of a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub booking_id: String,
    pub room_id: String,
    pub date: Date,
    pub slot: Slot,
    pub reserved_by: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMatch {
    /// Only the given day.
    #[default]
    Exact,
    /// The given day and every later one.
    Onward,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub room_id: Option<String>,
    pub date: Date,
    pub date_match: DateMatch,
    pub reserved_by: Option<String>,
}

impl BookingFilter {
    pub fn on(date: Date) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    pub fn starting(date: Date) -> Self {
        Self {
            date,
            date_match: DateMatch::Onward,
            ..Self::default()
        }
    }

    pub fn in_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn reserved_by(mut self, actor: impl Into<String>) -> Self {
        self.reserved_by = Some(actor.into());
        self
    }

    /// Whether a row with these attributes passes the filter.
    pub fn admits(&self, room_id: &str, date: Date, reserved_by: &str) -> bool {
        let date_ok = match self.date_match {
            DateMatch::Exact => date == self.date,
            DateMatch::Onward => date >= self.date,
        };
        date_ok
            && self.room_id.as_deref().is_none_or(|id| id == room_id)
            && self.reserved_by.as_deref().is_none_or(|owner| owner == reserved_by)
    }
}

/// What a caller needs to create a booking; the identifier is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub room_id: String,
    pub date: Date,
    pub start: Slot,
    pub end: Slot,
    pub actor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub date: Date,
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: String,
}

/// Query string of a reservation listing. Both fields are raw text: an empty
/// room id means every room and an empty date means today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationQuery {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub date: String,
}
