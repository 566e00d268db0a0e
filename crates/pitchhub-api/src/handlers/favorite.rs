//! Favourite listing handler.

use axum::Json;
use axum::extract::State;

use pitchhub_entity::pitch::Pitch;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Pitch>>>, ApiError> {
    let pitches = state.favorite_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(pitches)))
}
