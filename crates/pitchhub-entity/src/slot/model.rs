//! Time slot and pitch/slot binding models.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named time range reused across pitches, e.g. "Evening 1" 17:00-18:30.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeSlot {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique label.
    pub name: String,
    /// Start of the slot.
    pub start_time: NaiveTime,
    /// End of the slot. Always after `start_time`.
    pub end_time: NaiveTime,
}

impl TimeSlot {
    /// `HH:MM - HH:MM` rendering used in listings and e-mails.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Data required to create a time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlot {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl CreateTimeSlot {
    /// Whether the range is non-empty.
    pub fn is_ordered(&self) -> bool {
        self.start_time < self.end_time
    }
}

/// Binding of a time slot to a pitch. Bookings reference this row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchTimeSlot {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning pitch.
    pub pitch_id: Uuid,
    /// Referenced time slot.
    pub time_slot_id: Uuid,
    /// Per-pitch availability of this slot.
    pub is_available: bool,
}

/// A pitch time slot joined with its time slot, as read for booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PitchSlot {
    /// The pitch time slot identifier.
    pub id: Uuid,
    pub pitch_id: Uuid,
    pub time_slot_id: Uuid,
    pub is_available: bool,
    /// Label of the time slot.
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl PitchSlot {
    /// `HH:MM - HH:MM` rendering.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}
