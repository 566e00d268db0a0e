//! Review comment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_entity::comment::{Comment, CreateComment};

const COMMENT_SELECT: &str = "SELECT c.id, c.user_id, c.review_id, c.parent_id, u.username, \
     c.content, c.created_at, c.updated_at FROM comments c JOIN users u ON u.id = c.user_id";

/// Repository for comments on reviews.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every comment on a review, oldest first.
    pub async fn find_by_review(&self, review_id: Uuid) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "{COMMENT_SELECT} WHERE c.review_id = $1 ORDER BY c.created_at, c.id"
        ))
        .bind(review_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Create a comment.
    pub async fn create(&self, data: &CreateComment) -> AppResult<Comment> {
        let id = Uuid::now_v7();
        sqlx::query(
            "INSERT INTO comments (id, user_id, review_id, parent_id, content) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(data.user_id)
        .bind(data.review_id)
        .bind(data.parent_id)
        .bind(&data.content)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))?;

        sqlx::query_as::<_, Comment>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load comment", e))
    }
}
