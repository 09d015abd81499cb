use chrono::NaiveDate;
use eyre::eyre;
use roombook_core::{
    calendar::{Date, Slot},
    errors::{TimeError, TimeResult},
    models::{booking::SlotRow, room::Room},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub room_id: String,
    pub name: String,
    pub location: String,
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Room {
            room_id: row.room_id,
            name: row.name,
            location: row.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookingSlot {
    pub booking_id: String,
    pub room_id: String,
    pub date: NaiveDate,
    pub slot: i16,
    pub reserved_by: String,
}

impl TryFrom<DbBookingSlot> for SlotRow {
    type Error = TimeError;

    fn try_from(row: DbBookingSlot) -> TimeResult<Self> {
        let slot = Slot::new(i32::from(row.slot)).map_err(|_| {
            TimeError::Storage(eyre!(
                "booking {} has stored slot {} outside the day",
                row.booking_id,
                row.slot
            ))
        })?;
        Ok(SlotRow {
            booking_id: row.booking_id,
            room_id: row.room_id,
            date: Date::new(row.date),
            slot,
            reserved_by: row.reserved_by,
        })
    }
}
