pub mod booking;
pub mod room;

use async_trait::async_trait;
use roombook_core::{
    errors::{TimeError, TimeResult},
    models::booking::{Booking, BookingFilter, DateMatch, SlotRow},
    models::room::Room,
    repository::{BookingRepository, coalesce_rows},
};
use tracing::debug;

use crate::models::DbBookingSlot;
use crate::DbPool;

/// [`BookingRepository`] over the Postgres `rooms` and `bookings` tables.
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: DbPool,
}

impl PgBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn rebuild(slots: Vec<DbBookingSlot>) -> TimeResult<Vec<Booking>> {
    let rows = slots
        .into_iter()
        .map(SlotRow::try_from)
        .collect::<TimeResult<Vec<_>>>()?;
    coalesce_rows(rows)
}

/// Maps constraint violations on insert to their domain meaning.
fn insert_error(err: eyre::Report, booking: &Booking) -> TimeError {
    if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
        if db_err.is_unique_violation() {
            return TimeError::Conflict(format!(
                "Booking {} already exists",
                booking.booking_id
            ));
        }
        if db_err.is_foreign_key_violation() {
            return TimeError::NotFound(format!("Room {} not found", booking.room_id));
        }
    }
    TimeError::Storage(err)
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_rooms(&self) -> TimeResult<Vec<Room>> {
        let rooms = room::list_rooms(&self.pool).await?;
        Ok(rooms.into_iter().map(Room::from).collect())
    }

    async fn get_room(&self, room_id: &str) -> TimeResult<Room> {
        room::get_room_by_id(&self.pool, room_id)
            .await?
            .map(Room::from)
            .ok_or_else(|| TimeError::NotFound(format!("Room {room_id} not found")))
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> TimeResult<Vec<Booking>> {
        let date = filter
            .date
            .day()
            .ok_or_else(|| TimeError::Validation("booking filter needs a date".to_string()))?;

        let slots = booking::find_booking_slots(
            &self.pool,
            filter.room_id.as_deref(),
            date,
            filter.date_match == DateMatch::Onward,
            filter.reserved_by.as_deref(),
        )
        .await?;

        debug!("Fetched {} booking slots for {:?}", slots.len(), filter);
        rebuild(slots)
    }

    async fn get_booking(&self, booking_id: &str) -> TimeResult<Option<Booking>> {
        let slots = booking::get_booking_slots(&self.pool, booking_id).await?;
        Ok(rebuild(slots)?.into_iter().next())
    }

    async fn create_booking(&self, booking: &Booking) -> TimeResult<()> {
        let Some(date) = booking.date.day() else {
            return Err(TimeError::Validation(format!(
                "Booking {} has no date",
                booking.booking_id
            )));
        };
        if booking.end < booking.start {
            return Err(TimeError::Validation(format!(
                "Booking {} ends before it starts",
                booking.booking_id
            )));
        }

        let slots: Vec<DbBookingSlot> = booking
            .rows()
            .into_iter()
            .map(|row| DbBookingSlot {
                booking_id: row.booking_id,
                room_id: row.room_id,
                date,
                slot: i16::from(row.slot.index()),
                reserved_by: row.reserved_by,
            })
            .collect();

        debug!(
            "Inserting {} slots for booking {}",
            slots.len(),
            booking.booking_id
        );
        booking::insert_booking_slots(&self.pool, &slots)
            .await
            .map_err(|err| insert_error(err, booking))
    }

    async fn delete_booking(&self, booking_id: &str) -> TimeResult<()> {
        let removed = booking::delete_booking_slots(&self.pool, booking_id).await?;
        debug!("Deleted {} slots of booking {}", removed, booking_id);
        Ok(())
    }
}
