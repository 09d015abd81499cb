use serde::{Deserialize, Serialize};

use crate::models::{booking::Booking, room::Room};

/// A room with the bookings that reference it for the queried day(s).
///
/// Built on demand for responses and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(flatten)]
    pub room: Room,
    pub bookings: Vec<Booking>,
}
