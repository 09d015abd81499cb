//! # Booking storage contract
//!
//! A booking is a slot range, but storage holds one row per slot. Backends
//! expand bookings with [`Booking::rows`] on write and rebuild them with
//! [`coalesce_rows`] on read, so every backend reconstructs ranges the same
//! way.

use std::collections::HashMap;

use async_trait::async_trait;
use eyre::eyre;

use crate::errors::{TimeError, TimeResult};
use crate::models::booking::{Booking, BookingFilter, SlotRow};
use crate::models::room::Room;

/// Durable storage for rooms and their per-slot booking rows.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// The full room catalog in storage order.
    async fn list_rooms(&self) -> TimeResult<Vec<Room>>;

    /// Fails with [`TimeError::NotFound`] when no room has this id.
    async fn get_room(&self, room_id: &str) -> TimeResult<Room>;

    /// One booking per identifier, ordered by room, date and start slot.
    async fn list_bookings(&self, filter: &BookingFilter) -> TimeResult<Vec<Booking>>;

    /// `Ok(None)` when no rows carry this identifier.
    async fn get_booking(&self, booking_id: &str) -> TimeResult<Option<Booking>>;

    /// Persists one row per slot of the booking, all or nothing.
    ///
    /// Fails with [`TimeError::Conflict`] when the identifier is already taken.
    async fn create_booking(&self, booking: &Booking) -> TimeResult<()>;

    /// Removes every row of the booking. Unknown identifiers succeed.
    async fn delete_booking(&self, booking_id: &str) -> TimeResult<()>;
}

/// Rebuilds bookings from their per-slot rows.
///
/// Rows are put in room, date, slot order and grouped by booking id in order
/// of first appearance, so overlapping bookings whose rows interleave still
/// come out whole. Within a group every row must continue the previous one
/// by exactly one slot and agree on room, date and owner; anything else is
/// reported as a storage error rather than turned into a wrong range.
pub fn coalesce_rows(mut rows: Vec<SlotRow>) -> TimeResult<Vec<Booking>> {
    rows.sort_by(|a, b| {
        (&a.room_id, a.date, a.slot, &a.booking_id)
            .cmp(&(&b.room_id, b.date, b.slot, &b.booking_id))
    });

    let mut bookings: Vec<Booking> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(&position) = positions.get(&row.booking_id) else {
            positions.insert(row.booking_id.clone(), bookings.len());
            bookings.push(Booking {
                booking_id: row.booking_id,
                room_id: row.room_id,
                date: row.date,
                start: row.slot,
                end: row.slot,
                reserved_by: row.reserved_by,
            });
            continue;
        };

        let booking = &mut bookings[position];
        if booking.room_id != row.room_id
            || booking.date != row.date
            || booking.reserved_by != row.reserved_by
        {
            return Err(TimeError::Storage(eyre!(
                "rows of booking {} disagree on room, date or owner",
                booking.booking_id
            )));
        }
        if row.slot.index() != booking.end.index() + 1 {
            return Err(TimeError::Storage(eyre!(
                "booking {} has slot {} after slot {}",
                booking.booking_id,
                row.slot.index(),
                booking.end.index()
            )));
        }
        booking.end = row.slot;
    }

    Ok(bookings)
}
