//! Database migration management commands.

use clap::{Args, Subcommand};

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check connectivity and list migrations not yet applied
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            pitchhub_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if !db.health_check().await? {
                return Err(AppError::database(
                    "Database health check returned an unexpected value",
                ));
            }
            let pending = pitchhub_database::migration::pending_migrations(db.pool()).await?;
            if pending.is_empty() {
                output::print_success("Database reachable; schema is up to date.");
            } else {
                println!("{} pending migration(s):", pending.len());
                for m in &pending {
                    println!("  {} {}", m.version, m.description);
                }
            }
        }
    }

    Ok(())
}
