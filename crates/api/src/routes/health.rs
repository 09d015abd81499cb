use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    rooms: Option<usize>,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

/// Reports whether the booking store answers a catalog read.
async fn health_check(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.service.get_rooms().await {
        Ok(rooms) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                rooms: Some(rooms.len()),
            }),
        ),
        Err(err) => {
            error!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    rooms: None,
                }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
