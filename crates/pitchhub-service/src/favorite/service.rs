//! Favourite toggling and listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::error::AppError;
use pitchhub_database::repositories::{FavoriteRepository, PitchRepository};
use pitchhub_entity::pitch::Pitch;

use crate::context::RequestContext;

/// New favourite state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteToggle {
    pub pitch_id: Uuid,
    pub favorited: bool,
}

#[derive(Debug, Clone)]
pub struct FavoriteService {
    favorite_repo: Arc<FavoriteRepository>,
    pitch_repo: Arc<PitchRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl FavoriteService {
    pub fn new(
        favorite_repo: Arc<FavoriteRepository>,
        pitch_repo: Arc<PitchRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            favorite_repo,
            pitch_repo,
            rbac,
        }
    }

    /// Adds the pitch to the caller's favourites, or removes it if present.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        pitch_id: Uuid,
    ) -> Result<FavoriteToggle, AppError> {
        self.rbac.require(ctx.role, Capability::ManageFavorites)?;
        if self.pitch_repo.find_by_id(pitch_id).await?.is_none() {
            return Err(AppError::not_found(format!("Pitch {pitch_id} not found")));
        }

        let favorited = if self.favorite_repo.remove(ctx.user_id, pitch_id).await? {
            false
        } else {
            // A concurrent toggle may have added it first; it is favourited either way.
            self.favorite_repo.add(ctx.user_id, pitch_id).await?;
            true
        };

        debug!(user_id = %ctx.user_id, pitch_id = %pitch_id, favorited, "Favourite toggled");
        Ok(FavoriteToggle {
            pitch_id,
            favorited,
        })
    }

    /// The caller's favourite pitches.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Pitch>, AppError> {
        self.rbac.require(ctx.role, Capability::ManageFavorites)?;
        self.favorite_repo.find_pitches(ctx.user_id).await
    }
}
