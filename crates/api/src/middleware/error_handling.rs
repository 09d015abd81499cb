//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and the JSON error
//! envelope, so every handler reports failures the same way.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roombook_core::errors::TimeError;
use tracing::{error, warn};

use crate::response::ErrorBody;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps a [`TimeError`] and implements `IntoResponse`, so handlers
/// can return `Result<_, AppError>` and use `?` on service calls.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use roombook_api::middleware::error_handling::AppError;
/// use roombook_core::errors::TimeError;
///
/// async fn handler(room_id: String) -> Result<Json<String>, AppError> {
///     if room_id.is_empty() {
///         return Err(AppError(TimeError::Validation("room_id is required".to_string())));
///     }
///     Ok(Json(room_id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimeError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimeError::Format(_) => StatusCode::BAD_REQUEST,
            TimeError::Validation(_) => StatusCode::BAD_REQUEST,
            TimeError::NotFound(_) => StatusCode::NOT_FOUND,
            TimeError::Ownership(_) => StatusCode::FORBIDDEN,
            TimeError::Conflict(_) => StatusCode::CONFLICT,
            TimeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("{:?}", self.0);
        } else {
            warn!("{}", message);
        }

        (status, Json(ErrorBody::new(status, message))).into_response()
    }
}

/// Allows `?` on functions returning `Result<T, TimeError>` inside handlers.
impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        AppError(err)
    }
}

/// Malformed JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(TimeError::Validation(rejection.body_text()))
    }
}

/// Maps a TimeError to an HTTP response
pub fn map_error(err: TimeError) -> Response {
    AppError(err).into_response()
}
