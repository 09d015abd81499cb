use axum::{Router, routing::{delete, get}};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route("/bookings/:id", delete(handlers::booking::delete_booking))
        .route("/self/bookings", get(handlers::booking::list_self_bookings))
}
