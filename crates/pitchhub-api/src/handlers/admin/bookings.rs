//! Admin booking queue: list, approve, reject.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::booking::{BookingDetail, BookingStatus};

use crate::dto::request::{AdminBookingsQuery, RejectBookingRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::json::to_app_error;
use crate::state::AppState;

/// GET /api/admin/bookings?status=&page=&per_page=
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<ApiResponse<PageResponse<BookingDetail>>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<BookingStatus>)
        .transpose()?;
    let page = PageRequest::new(
        query.page.unwrap_or(1),
        query
            .per_page
            .unwrap_or(state.config.booking.bookings_page_size),
    );

    let bookings = state
        .booking_service
        .list_all(&auth, status, &page)
        .await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// POST /api/admin/bookings/{id}/approve
pub async fn approve_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDetail>>, ApiError> {
    let booking = state.booking_service.approve(&auth, id).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/admin/bookings/{id}/reject
///
/// The body is optional; without a reason the configured default is used.
pub async fn reject_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ApiResponse<BookingDetail>>, ApiError> {
    let reason = parse_reject_body(&body)?.reason;
    let booking = state.booking_service.reject(&auth, id, reason).await?;
    Ok(Json(ApiResponse::ok(booking)))
}

fn parse_reject_body(body: &[u8]) -> Result<RejectBookingRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RejectBookingRequest::default());
    }
    let req: RejectBookingRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    req.validate().map_err(to_app_error)?;
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reject_body_has_no_reason() {
        assert!(parse_reject_body(b"").unwrap().reason.is_none());
        assert!(parse_reject_body(b"  \n").unwrap().reason.is_none());
    }

    #[test]
    fn test_reject_body_with_reason() {
        let req = parse_reject_body(br#"{"reason":"Pitch under maintenance"}"#).unwrap();
        assert_eq!(req.reason.as_deref(), Some("Pitch under maintenance"));
    }

    #[test]
    fn test_malformed_reject_body() {
        let err = parse_reject_body(b"{oops").unwrap_err();
        assert_eq!(err.kind, pitchhub_core::error::ErrorKind::Validation);
    }
}
