//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the RoomBook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8081)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Size of the connection pool (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `ACTOR_HEADER`: Request header carrying the acting user (default: "X-Actor")

use axum::http::{HeaderName, HeaderValue};
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Header carrying the actor identity when `ACTOR_HEADER` is not set.
pub const DEFAULT_ACTOR_HEADER: &str = "x-actor";

/// Configuration for the RoomBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use roombook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<HeaderValue>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Header the acting user's identity is read from
    pub actor_header: HeaderName,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT or DB_MAX_CONNECTIONS value cannot be parsed
    /// - An API_CORS_ORIGINS entry or ACTOR_HEADER is not a valid header value
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8081".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = match env::var("API_CORS_ORIGINS") {
            Ok(origins) => Some(
                origins
                    .split(',')
                    .map(|origin| origin.trim().parse::<HeaderValue>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .wrap_err("Invalid API_CORS_ORIGINS value")?,
            ),
            Err(_) => None,
        };

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Identity settings
        let actor_header = env::var("ACTOR_HEADER")
            .unwrap_or_else(|_| DEFAULT_ACTOR_HEADER.to_string())
            .parse::<HeaderName>()
            .wrap_err("Invalid ACTOR_HEADER value")?;

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            log_level,
            cors_origins,
            request_timeout,
            actor_header,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8081")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
