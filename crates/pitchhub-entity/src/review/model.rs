//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's rating of a pitch. One per (user, pitch).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pitch_id: Uuid,
    /// Author's username, joined for display.
    pub username: String,
    /// Rating from 1 to 5.
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    pub user_id: Uuid,
    pub pitch_id: Uuid,
    pub rating: i32,
    pub content: String,
}
