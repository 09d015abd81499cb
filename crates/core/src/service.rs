//! # Booking service
//!
//! Request-level operations on top of a [`BookingRepository`]: reading
//! reservations for a day or an actor, creating bookings under derived
//! identifiers, and deleting bookings on behalf of their owner.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::aggregate::build_reservations;
use crate::calendar::{Date, booking_id};
use crate::errors::{TimeError, TimeResult};
use crate::models::booking::{Booking, BookingFilter, NewBooking};
use crate::models::reservation::Reservation;
use crate::models::room::Room;
use crate::repository::BookingRepository;

#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Every room in the catalog.
    async fn get_rooms(&self) -> TimeResult<Vec<Room>>;

    /// Reservations on `date` (today when unset), for one room or all of them.
    async fn get_reservations(
        &self,
        room_id: Option<&str>,
        date: Date,
    ) -> TimeResult<Vec<Reservation>>;

    /// The actor's bookings from today onward, grouped under every room.
    async fn get_self_reservations(&self, actor: &str) -> TimeResult<Vec<Reservation>>;

    /// Stores a booking owned by the actor and returns its identifier.
    async fn create_booking(&self, request: NewBooking) -> TimeResult<String>;

    /// Deletes a booking, refusing when the actor does not own it.
    async fn delete_booking(&self, booking_id: &str, actor: &str) -> TimeResult<()>;
}

/// The [`ReservationService`] backed by any [`BookingRepository`].
#[derive(Clone)]
pub struct BookingManager {
    repository: Arc<dyn BookingRepository>,
}

impl BookingManager {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ReservationService for BookingManager {
    async fn get_rooms(&self) -> TimeResult<Vec<Room>> {
        self.repository.list_rooms().await
    }

    async fn get_reservations(
        &self,
        room_id: Option<&str>,
        date: Date,
    ) -> TimeResult<Vec<Reservation>> {
        let date = date.or_today();
        let mut filter = BookingFilter::on(date);

        let rooms = match room_id {
            Some(room_id) => {
                filter = filter.in_room(room_id);
                vec![self.repository.get_room(room_id).await?]
            }
            None => self.repository.list_rooms().await?,
        };
        let bookings = self.repository.list_bookings(&filter).await?;

        debug!(
            "Reservations for {}: {} rooms, {} bookings",
            date,
            rooms.len(),
            bookings.len()
        );
        Ok(build_reservations(rooms, bookings))
    }

    async fn get_self_reservations(&self, actor: &str) -> TimeResult<Vec<Reservation>> {
        let rooms = self.repository.list_rooms().await?;
        let filter = BookingFilter::starting(Date::today()).reserved_by(actor);
        let bookings = self.repository.list_bookings(&filter).await?;

        Ok(build_reservations(rooms, bookings))
    }

    async fn create_booking(&self, request: NewBooking) -> TimeResult<String> {
        let booking_id = booking_id(&request.room_id, request.date, request.start)?;
        let booking = Booking {
            booking_id: booking_id.clone(),
            room_id: request.room_id,
            date: request.date,
            start: request.start,
            end: request.end,
            reserved_by: request.actor,
        };

        self.repository.create_booking(&booking).await?;

        info!(
            "Booking {} created: slots {}..={} by {}",
            booking.booking_id,
            booking.start.index(),
            booking.end.index(),
            booking.reserved_by
        );
        Ok(booking_id)
    }

    async fn delete_booking(&self, booking_id: &str, actor: &str) -> TimeResult<()> {
        let booking = self
            .repository
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| TimeError::NotFound(format!("Booking {booking_id} not found")))?;

        if booking.reserved_by != actor {
            return Err(TimeError::Ownership(format!(
                "Booking {booking_id} is not owned by {actor}"
            )));
        }

        self.repository.delete_booking(booking_id).await?;

        info!("Booking {} deleted by {}", booking_id, actor);
        Ok(())
    }
}
