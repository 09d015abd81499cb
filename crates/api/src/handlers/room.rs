use axum::{Json, extract::State};
use roombook_core::models::room::Room;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError, response::{self, Envelope}};

#[axum::debug_handler]
pub async fn list_rooms(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Envelope<Vec<Room>>>, AppError> {
    let rooms = state.service.get_rooms().await?;
    Ok(response::list(rooms))
}
