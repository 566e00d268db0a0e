//! Review comment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pitchhub_entity::comment::Comment;
use pitchhub_service::review::{self, CommentThread};

use crate::dto::request::CreateCommentRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/reviews/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentThread>>>, ApiError> {
    let threads = state.comment_service.list(id).await?;
    Ok(Json(ApiResponse::ok(threads)))
}

/// POST /api/reviews/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let comment = state
        .comment_service
        .create(
            &auth,
            id,
            review::CreateCommentRequest {
                content: req.content,
                parent_id: req.parent_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(comment))))
}
