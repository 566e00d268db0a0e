//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a review, or a reply to another comment on it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub review_id: Uuid,
    /// Comment this one replies to. `None` for a top-level comment.
    pub parent_id: Option<Uuid>,
    /// Author's username, joined for display.
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub user_id: Uuid,
    pub review_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}
