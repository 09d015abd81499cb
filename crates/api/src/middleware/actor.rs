//! # Actor Extraction
//!
//! The acting user is an opaque string taken from a configurable request
//! header. Nothing here verifies who the caller is; handlers that need an
//! actor simply take an [`Actor`] argument and get a 400 when the header is
//! missing or blank.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use roombook_core::errors::TimeError;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub String);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(&state.actor_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Actor(value.to_string()))
            .ok_or_else(|| {
                AppError(TimeError::Validation(format!(
                    "{} header is not set",
                    state.actor_header
                )))
            })
    }
}
