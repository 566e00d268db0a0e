//! Admin catalogue maintenance.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use pitchhub_entity::pitch::{CreatePitch, CreatePitchType, Pitch, PitchType, UpdatePitch};
use pitchhub_entity::slot::{CreateTimeSlot, PitchTimeSlot, TimeSlot};
use pitchhub_service::pitch::AttachSlotRequest;

use crate::dto::request::{
    CreatePitchRequest, CreatePitchTypeRequest, CreateTimeSlotRequest, UpdatePitchRequest,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/admin/pitch-types
pub async fn create_pitch_type(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePitchTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PitchType>>), ApiError> {
    let pitch_type = state
        .catalog_service
        .create_type(
            &auth,
            CreatePitchType {
                name: req.name,
                description: req.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(pitch_type))))
}

/// POST /api/admin/pitches
pub async fn create_pitch(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePitchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Pitch>>), ApiError> {
    let pitch = state
        .catalog_service
        .create_pitch(
            &auth,
            CreatePitch {
                name: req.name,
                address: req.address,
                description: req.description,
                pitch_type_id: req.pitch_type_id,
                base_price_per_hour: req.base_price_per_hour,
                images: req.images,
                is_available: req.is_available,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(pitch))))
}

/// PUT /api/admin/pitches/{id}
///
/// Absent fields are left unchanged.
pub async fn update_pitch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdatePitchRequest>,
) -> Result<Json<ApiResponse<Pitch>>, ApiError> {
    let pitch = state
        .catalog_service
        .update_pitch(
            &auth,
            id,
            UpdatePitch {
                name: req.name,
                address: req.address,
                description: req.description,
                pitch_type_id: req.pitch_type_id,
                base_price_per_hour: req.base_price_per_hour,
                images: req.images,
                is_available: req.is_available,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(pitch)))
}

/// GET /api/admin/time-slots
pub async fn list_time_slots(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TimeSlot>>>, ApiError> {
    let slots = state.catalog_service.list_time_slots().await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// POST /api/admin/time-slots
pub async fn create_time_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TimeSlot>>), ApiError> {
    let slot = state
        .catalog_service
        .create_time_slot(
            &auth,
            CreateTimeSlot {
                name: req.name,
                start_time: req.start_time,
                end_time: req.end_time,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(slot))))
}

/// POST /api/admin/pitches/{id}/slots
pub async fn attach_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AttachSlotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PitchTimeSlot>>), ApiError> {
    let attached = state.catalog_service.attach_slot(&auth, id, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(attached))))
}
