//! # RoomBook API
//!
//! The API crate provides the web server for the RoomBook room booking service.
//! It exposes rooms, per-day reservations and the caller's own bookings, and
//! lets callers create and delete bookings.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and call the booking service
//! - **Middleware**: Actor extraction and error mapping
//! - **Response**: The JSON envelope shared by every endpoint
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; storage sits behind the
//! [`ReservationService`] so any booking repository can back it.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for actor identity and error handling
pub mod middleware;
/// JSON response envelope
pub mod response;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::{HeaderName, HeaderValue, Method, header}};
use eyre::Result;
use roombook_core::service::ReservationService;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking operations the handlers delegate to
    pub service: Arc<dyn ReservationService>,
    /// Header the acting user is read from
    pub actor_header: HeaderName,
}

/// Installs the global tracing subscriber at the given level.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes and the cache-disabling
/// response headers.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Room catalog endpoints
        .merge(routes::room::routes())
        // Booking endpoints
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store, must-revalidate"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::PRAGMA,
                    HeaderValue::from_static("no-cache"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::EXPIRES,
                    HeaderValue::from_static("0"),
                )),
        )
}

/// Starts the API server with the provided configuration and booking service
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use roombook_api::{config::ApiConfig, start_server};
/// # use roombook_core::service::BookingManager;
/// # use roombook_db::{create_pool, PgBookingRepository};
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.max_connections).await?;
/// let service = Arc::new(BookingManager::new(Arc::new(PgBookingRepository::new(pool))));
/// start_server(config, service).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    service: Arc<dyn ReservationService>,
) -> Result<()> {
    let state = Arc::new(ApiState {
        service,
        actor_header: config.actor_header.clone(),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                config.actor_header.clone(),
            ])
            .allow_origin(origins.clone());

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
