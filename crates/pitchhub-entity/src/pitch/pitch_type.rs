//! Pitch type (5-a-side, 7-a-side, futsal, ...).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A category of pitch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchType {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Data required to create a pitch type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePitchType {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
