//! Favourite repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_entity::favorite::Favorite;
use pitchhub_entity::pitch::Pitch;

/// Repository for (user, pitch) favourite pairs.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favourite repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add the pair. Returns `None` if it already existed.
    pub async fn add(&self, user_id: Uuid, pitch_id: Uuid) -> AppResult<Option<Favorite>> {
        sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (id, user_id, pitch_id) VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT favorites_user_pitch_unique DO NOTHING \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(pitch_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add favourite", e))
    }

    /// Remove the pair. Returns `false` if it did not exist.
    pub async fn remove(&self, user_id: Uuid, pitch_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND pitch_id = $2")
            .bind(user_id)
            .bind(pitch_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove favourite", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's favourite pitches, most recently added first.
    pub async fn find_pitches(&self, user_id: Uuid) -> AppResult<Vec<Pitch>> {
        sqlx::query_as::<_, Pitch>(
            "SELECT p.* FROM favorites f JOIN pitches p ON p.id = f.pitch_id \
             WHERE f.user_id = $1 ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list favourites", e))
    }
}
