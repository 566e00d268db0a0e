//! Catalogue service: public browsing and admin maintenance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::config::BookingConfig;
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_database::repositories::{PitchRepository, SlotRepository};
use pitchhub_entity::pitch::{CreatePitch, CreatePitchType, Pitch, PitchType, UpdatePitch};
use pitchhub_entity::slot::{CreateTimeSlot, PitchSlot, PitchTimeSlot, TimeSlot};

use super::search::PitchSearchQuery;
use crate::context::RequestContext;

/// A pitch with the slots attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchDetail {
    #[serde(flatten)]
    pub pitch: Pitch,
    pub slots: Vec<PitchSlot>,
}

/// Request to attach an existing time slot to a pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachSlotRequest {
    pub time_slot_id: Uuid,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Reads and maintains pitches, pitch types and time slots.
#[derive(Debug, Clone)]
pub struct CatalogService {
    pitch_repo: Arc<PitchRepository>,
    slot_repo: Arc<SlotRepository>,
    rbac: Arc<RbacEnforcer>,
    config: BookingConfig,
}

impl CatalogService {
    /// Creates a new catalogue service.
    pub fn new(
        pitch_repo: Arc<PitchRepository>,
        slot_repo: Arc<SlotRepository>,
        rbac: Arc<RbacEnforcer>,
        config: BookingConfig,
    ) -> Self {
        Self {
            pitch_repo,
            slot_repo,
            rbac,
            config,
        }
    }

    /// Searches pitches. Pages hold `search_page_size` items.
    pub async fn search(&self, query: &PitchSearchQuery) -> Result<PageResponse<Pitch>, AppError> {
        let page = PageRequest::new(query.page.unwrap_or(1), self.config.search_page_size);
        self.pitch_repo.search(&query.to_filter(), &page).await
    }

    /// Gets a pitch with its slots.
    pub async fn get(&self, pitch_id: Uuid) -> Result<PitchDetail, AppError> {
        let pitch = self.find(pitch_id).await?;
        let slots = self.slot_repo.find_by_pitch(pitch_id).await?;
        Ok(PitchDetail { pitch, slots })
    }

    pub async fn list_types(&self) -> Result<Vec<PitchType>, AppError> {
        self.pitch_repo.find_all_types().await
    }

    pub async fn list_time_slots(&self) -> Result<Vec<TimeSlot>, AppError> {
        self.slot_repo.find_all_time_slots().await
    }

    /// Creates a pitch type.
    pub async fn create_type(
        &self,
        ctx: &RequestContext,
        data: CreatePitchType,
    ) -> Result<PitchType, AppError> {
        self.rbac.require(ctx.role, Capability::ManageCatalog)?;
        require_text("name", &data.name)?;

        let pitch_type = self.pitch_repo.create_type(&data).await?;
        info!(pitch_type_id = %pitch_type.id, name = %pitch_type.name, "Pitch type created");
        Ok(pitch_type)
    }

    /// Creates a pitch.
    pub async fn create_pitch(
        &self,
        ctx: &RequestContext,
        data: CreatePitch,
    ) -> Result<Pitch, AppError> {
        self.rbac.require(ctx.role, Capability::ManageCatalog)?;
        require_text("name", &data.name)?;
        require_text("address", &data.address)?;
        if data.base_price_per_hour.is_sign_negative() {
            return Err(AppError::field(
                "base_price_per_hour",
                "Price per hour cannot be negative",
            ));
        }

        let pitch = self.pitch_repo.create(&data).await?;
        info!(pitch_id = %pitch.id, name = %pitch.name, admin_id = %ctx.user_id, "Pitch created");
        Ok(pitch)
    }

    /// Applies a partial update to a pitch.
    pub async fn update_pitch(
        &self,
        ctx: &RequestContext,
        pitch_id: Uuid,
        data: UpdatePitch,
    ) -> Result<Pitch, AppError> {
        self.rbac.require(ctx.role, Capability::ManageCatalog)?;
        if let Some(name) = &data.name {
            require_text("name", name)?;
        }
        if let Some(address) = &data.address {
            require_text("address", address)?;
        }
        if data
            .base_price_per_hour
            .is_some_and(|price| price.is_sign_negative())
        {
            return Err(AppError::field(
                "base_price_per_hour",
                "Price per hour cannot be negative",
            ));
        }

        let pitch = self
            .pitch_repo
            .update(pitch_id, &data)
            .await?
            .ok_or_else(|| pitch_not_found(pitch_id))?;
        info!(pitch_id = %pitch.id, admin_id = %ctx.user_id, "Pitch updated");
        Ok(pitch)
    }

    /// Creates a reusable time slot.
    pub async fn create_time_slot(
        &self,
        ctx: &RequestContext,
        data: CreateTimeSlot,
    ) -> Result<TimeSlot, AppError> {
        self.rbac.require(ctx.role, Capability::ManageCatalog)?;
        require_text("name", &data.name)?;
        if !data.is_ordered() {
            return Err(AppError::field(
                "end_time",
                "End time must be after start time",
            ));
        }

        let slot = self.slot_repo.create_time_slot(&data).await?;
        info!(time_slot_id = %slot.id, range = %slot.time_range(), "Time slot created");
        Ok(slot)
    }

    /// Attaches a time slot to a pitch.
    pub async fn attach_slot(
        &self,
        ctx: &RequestContext,
        pitch_id: Uuid,
        req: AttachSlotRequest,
    ) -> Result<PitchTimeSlot, AppError> {
        self.rbac.require(ctx.role, Capability::ManageCatalog)?;
        self.find(pitch_id).await?;

        let attached = self
            .slot_repo
            .attach(pitch_id, req.time_slot_id, req.is_available)
            .await?;
        info!(
            pitch_id = %pitch_id,
            time_slot_id = %req.time_slot_id,
            "Time slot attached to pitch"
        );
        Ok(attached)
    }

    async fn find(&self, pitch_id: Uuid) -> Result<Pitch, AppError> {
        self.pitch_repo
            .find_by_id(pitch_id)
            .await?
            .ok_or_else(|| pitch_not_found(pitch_id))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, format!("{field} cannot be empty")));
    }
    Ok(())
}

fn pitch_not_found(pitch_id: Uuid) -> AppError {
    AppError::not_found(format!("Pitch {pitch_id} not found"))
}
