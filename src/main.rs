//! PitchHub server: sports pitch booking.
//!
//! Loads configuration, connects to PostgreSQL, applies migrations and
//! starts the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("PITCHHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PitchHub v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    pitchhub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    pitchhub_api::run_server(config, db.into_pool()).await
}
