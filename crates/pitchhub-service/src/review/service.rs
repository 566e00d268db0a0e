//! Review service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_database::repositories::{BookingRepository, PitchRepository, ReviewRepository};
use pitchhub_entity::review::{CreateReview, Review};

use crate::context::RequestContext;

/// Request to review a pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub content: String,
}

impl CreateReviewRequest {
    /// Rating within 1..=5 and non-blank content.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::field("rating", "Rating must be between 1 and 5"));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::field("content", "Review content cannot be empty"));
        }
        Ok(())
    }
}

/// Writes and lists pitch reviews.
#[derive(Debug, Clone)]
pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    pitch_repo: Arc<PitchRepository>,
    booking_repo: Arc<BookingRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        review_repo: Arc<ReviewRepository>,
        pitch_repo: Arc<PitchRepository>,
        booking_repo: Arc<BookingRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            review_repo,
            pitch_repo,
            booking_repo,
            rbac,
        }
    }

    /// Reviews of a pitch, newest first.
    pub async fn list(
        &self,
        pitch_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<Review>, AppError> {
        self.review_repo.find_by_pitch(pitch_id, page).await
    }

    /// Adds the caller's review. Requires a confirmed booking on the pitch.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        pitch_id: Uuid,
        req: CreateReviewRequest,
    ) -> Result<Review, AppError> {
        self.rbac.require(ctx.role, Capability::WriteReview)?;
        req.validate()?;

        if self.pitch_repo.find_by_id(pitch_id).await?.is_none() {
            return Err(AppError::not_found(format!("Pitch {pitch_id} not found")));
        }
        if !self.booking_repo.has_confirmed(ctx.user_id, pitch_id).await? {
            return Err(AppError::validation(
                "You can only review pitches you have a confirmed booking on",
            ));
        }

        let review = self
            .review_repo
            .create(&CreateReview {
                user_id: ctx.user_id,
                pitch_id,
                rating: req.rating,
                content: req.content.trim().to_string(),
            })
            .await?;

        info!(
            review_id = %review.id,
            pitch_id = %pitch_id,
            user_id = %ctx.user_id,
            rating = review.rating,
            "Review created"
        );
        Ok(review)
    }
}
