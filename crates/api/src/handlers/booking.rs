use axum::{Json, extract::{Path, Query, State, rejection::JsonRejection}};
use roombook_core::{
    calendar::{BookingKey, Date, Slot},
    errors::{TimeError, TimeResult},
    models::{
        booking::{CreateBookingRequest, CreateBookingResponse, NewBooking, ReservationQuery},
        reservation::Reservation,
    },
};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{actor::Actor, error_handling::AppError},
    response::{self, Envelope},
};

/// Checks a create request before it reaches the service.
///
/// The room id must be present, the date set and not before `today`, both
/// slots inside the day and the range not reversed.
pub fn validate_create_request(
    payload: CreateBookingRequest,
    actor: String,
    today: Date,
) -> TimeResult<NewBooking> {
    let room_id = payload.room_id.trim().to_string();
    if room_id.is_empty() {
        return Err(TimeError::Validation("room_id is required".to_string()));
    }
    if payload.date.is_unset() {
        return Err(TimeError::Validation("date is required".to_string()));
    }
    if payload.date < today {
        return Err(TimeError::Validation(format!(
            "date {} is in the past",
            payload.date
        )));
    }

    let start = Slot::new(payload.start)?;
    let end = Slot::new(payload.end)?;
    if end < start {
        return Err(TimeError::Validation(format!(
            "end slot {} is before start slot {}",
            payload.end, payload.start
        )));
    }

    Ok(NewBooking {
        room_id,
        date: payload.date,
        start,
        end,
        actor,
    })
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<Envelope<Vec<Reservation>>>, AppError> {
    let date = Date::parse(query.date.trim())?;
    let room_id = Some(query.room_id.trim()).filter(|id| !id.is_empty());

    let reservations = state.service.get_reservations(room_id, date).await?;
    Ok(response::list(reservations))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Actor(actor): Actor,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<Envelope<CreateBookingResponse>>, AppError> {
    let Json(payload) = payload?;
    let request = validate_create_request(payload, actor, Date::today())?;

    let booking_id = state.service.create_booking(request).await?;
    Ok(response::success(CreateBookingResponse { booking_id }))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Actor(actor): Actor,
) -> Result<Json<Envelope<()>>, AppError> {
    // Reject ids that could never have been issued
    id.parse::<BookingKey>()?;

    state.service.delete_booking(&id, &actor).await?;
    Ok(response::message("Delete Booking successful"))
}

#[axum::debug_handler]
pub async fn list_self_bookings(
    State(state): State<Arc<ApiState>>,
    Actor(actor): Actor,
) -> Result<Json<Envelope<Vec<Reservation>>>, AppError> {
    let reservations = state.service.get_self_reservations(&actor).await?;
    Ok(response::list(reservations))
}
