//! Pitch entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable sports pitch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pitch {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Pitch type reference.
    pub pitch_type_id: Uuid,
    /// Hourly rate, two decimal places.
    pub base_price_per_hour: Decimal,
    /// Image URLs.
    pub images: Vec<String>,
    /// Whether the pitch accepts bookings at all.
    pub is_available: bool,
    /// When the pitch was created.
    pub created_at: DateTime<Utc>,
    /// When the pitch was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePitch {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub pitch_type_id: Uuid,
    pub base_price_per_hour: Decimal,
    pub images: Vec<String>,
    pub is_available: bool,
}

/// Partial update of a pitch. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePitch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub pitch_type_id: Option<Uuid>,
    pub base_price_per_hour: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}
