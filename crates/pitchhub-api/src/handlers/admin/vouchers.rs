//! Admin voucher management.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use pitchhub_core::types::pagination::PageResponse;
use pitchhub_entity::voucher::Voucher;
use pitchhub_service::voucher;

use crate::dto::request::CreateVoucherRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/vouchers
pub async fn create_voucher(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateVoucherRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Voucher>>), ApiError> {
    let created = state
        .voucher_service
        .create(
            &auth,
            voucher::CreateVoucherRequest {
                code: req.code,
                description: req.description,
                discount_percent: req.discount_percent,
                min_order_value: req.min_order_value,
                usage_limit: req.usage_limit,
                start_date: req.start_date,
                end_date: req.end_date,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// GET /api/admin/vouchers
pub async fn list_vouchers(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Voucher>>>, ApiError> {
    let page = params.into_page_request(state.config.booking.bookings_page_size);
    let vouchers = state.voucher_service.list(&auth, page).await?;
    Ok(Json(ApiResponse::ok(vouchers)))
}
