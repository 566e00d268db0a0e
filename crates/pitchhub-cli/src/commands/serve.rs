//! Start the PitchHub server.

use clap::Args;

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    println!("Starting PitchHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let pool = super::create_db_pool(&config).await?;

    if !args.no_migrate {
        println!("Running database migrations...");
        pitchhub_database::migration::run_migrations(&pool).await?;
        println!("  Migrations applied successfully.");
    }

    pitchhub_api::run_server(config, pool).await
}
