//! Auth handlers: register, activate, login, me.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pitchhub_service::account;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state
        .account_service
        .register(account::RegisterRequest {
            username: req.username,
            email: req.email,
            full_name: req.full_name,
            phone_number: req.phone_number,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /api/auth/activate/{token}
pub async fn activate(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.account_service.activate(&token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Account activated. You can now log in.".to_string(),
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let (user, token) = state
        .account_service
        .login(account::LoginRequest {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse::new(user, token))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.me(auth.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
