//! Public pitch catalogue handlers plus reviews and favourite toggling.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use pitchhub_core::types::pagination::PageResponse;
use pitchhub_entity::pitch::{Pitch, PitchType};
use pitchhub_entity::review::Review;
use pitchhub_service::booking::SlotAvailability;
use pitchhub_service::favorite::FavoriteToggle;
use pitchhub_service::pitch::{PitchDetail, PitchSearchQuery};
use pitchhub_service::review;

use crate::dto::request::{CreateReviewRequest, SlotBoardQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/pitches
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<PitchSearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<Pitch>>>, ApiError> {
    let page = state.catalog_service.search(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/pitches/{id}
pub async fn get_pitch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PitchDetail>>, ApiError> {
    let detail = state.catalog_service.get(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// GET /api/pitches/{id}/slots?date=
///
/// `date` defaults to today (UTC).
pub async fn slot_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotBoardQuery>,
) -> Result<Json<ApiResponse<Vec<SlotAvailability>>>, ApiError> {
    let today = Utc::now().date_naive();
    let board = state
        .booking_service
        .slot_board(id, query.date.unwrap_or(today), today)
        .await?;
    Ok(Json(ApiResponse::ok(board)))
}

/// GET /api/pitch-types
pub async fn list_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PitchType>>>, ApiError> {
    let types = state.catalog_service.list_types().await?;
    Ok(Json(ApiResponse::ok(types)))
}

/// GET /api/pitches/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Review>>>, ApiError> {
    let page = params.into_page_request(state.config.booking.bookings_page_size);
    let reviews = state.review_service.list(id, &page).await?;
    Ok(Json(ApiResponse::ok(reviews)))
}

/// POST /api/pitches/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    let review = state
        .review_service
        .create(
            &auth,
            id,
            review::CreateReviewRequest {
                rating: req.rating,
                content: req.content,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review))))
}

/// POST /api/pitches/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FavoriteToggle>>, ApiError> {
    let toggled = state.favorite_service.toggle(&auth, id).await?;
    Ok(Json(ApiResponse::ok(toggled)))
}
