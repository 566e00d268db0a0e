//! Review repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::review::{CreateReview, Review};

const REVIEW_SELECT: &str = "SELECT r.id, r.user_id, r.pitch_id, u.username, r.rating, r.content, \
     r.created_at, r.updated_at FROM reviews r JOIN users u ON u.id = r.user_id";

/// Repository for pitch reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List reviews of a pitch, newest first.
    pub async fn find_by_pitch(
        &self,
        pitch_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE pitch_id = $1")
            .bind(pitch_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reviews", e))?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "{REVIEW_SELECT} WHERE r.pitch_id = $1 ORDER BY r.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(pitch_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))?;

        Ok(PageResponse::new(
            reviews,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>(&format!("{REVIEW_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// Create a review. A second review of the same pitch is a conflict.
    pub async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO reviews (id, user_id, pitch_id, rating, content) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(data.user_id)
        .bind(data.pitch_id)
        .bind(data.rating)
        .bind(&data.content)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("reviews_user_pitch_unique") =>
            {
                AppError::conflict("You have already reviewed this pitch")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create review", e),
        })?;

        sqlx::query_as::<_, Review>(&format!("{REVIEW_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load review", e))
    }
}
