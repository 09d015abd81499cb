use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use roombook_api::config::ApiConfig;
use roombook_core::service::BookingManager;
use roombook_db::{PgBookingRepository, create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging
    roombook_api::init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Wire storage into the booking service
    let repository = Arc::new(PgBookingRepository::new(db_pool));
    let service = Arc::new(BookingManager::new(repository));

    // Start API server
    roombook_api::start_server(config, service).await?;

    Ok(())
}
