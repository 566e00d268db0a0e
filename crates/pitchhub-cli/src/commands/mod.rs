//! CLI command definitions and dispatch.

pub mod admin;
pub mod booking;
pub mod migrate;
pub mod serve;
pub mod voucher;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_database::DatabasePool;

use crate::output::OutputFormat;

/// PitchHub: sports pitch booking
#[derive(Debug, Parser)]
#[command(name = "pitchhub", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay, read from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Administrator accounts
    Admin(admin::AdminArgs),
    /// Voucher management
    Voucher(voucher::VoucherArgs),
    /// Booking inspection
    Booking(booking::BookingArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, &config).await,
            Commands::Voucher(args) => voucher::execute(args, &config, self.format).await,
            Commands::Booking(args) => booking::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: map a dialoguer failure
pub fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}
