//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use pitchhub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// A migration the database has not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMigration {
    pub version: i64,
    pub description: String,
}

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        known = MIGRATOR.iter().count(),
        "Running database migrations..."
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Embedded migrations not yet recorded as applied, oldest first.
pub async fn pending_migrations(pool: &PgPool) -> Result<Vec<PendingMigration>, AppError> {
    let tracked: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to inspect migrations", e)
            })?;

    let applied: Vec<i64> = if tracked {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list applied migrations", e)
            })?
    } else {
        Vec::new()
    };

    Ok(unapplied(&applied))
}

fn unapplied(applied: &[i64]) -> Vec<PendingMigration> {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration() && !applied.contains(&m.version))
        .map(|m| PendingMigration {
            version: m.version,
            description: m.description.to_string(),
        })
        .collect()
}
