//! User booking handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pitchhub_core::types::pagination::PageResponse;
use pitchhub_entity::booking::BookingDetail;
use pitchhub_service::booking::{self, BookingOutcome};

use crate::dto::request::CreateBookingRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingOutcome>>), ApiError> {
    let outcome = state
        .booking_service
        .create(
            &auth,
            booking::CreateBookingRequest {
                pitch_id: req.pitch_id,
                time_slot_id: req.time_slot_id,
                booking_date: req.booking_date,
                voucher_code: req.voucher_code,
                note: req.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(outcome))))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<BookingDetail>>>, ApiError> {
    let page = params.into_page_request(state.config.booking.bookings_page_size);
    let bookings = state.booking_service.list_own(&auth, &page).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDetail>>, ApiError> {
    let booking = state.booking_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDetail>>, ApiError> {
    let booking = state.booking_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}
