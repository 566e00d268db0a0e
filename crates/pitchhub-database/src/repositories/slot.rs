//! Time slot and pitch/slot binding repository.

use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_entity::slot::{CreateTimeSlot, PitchSlot, PitchTimeSlot, TimeSlot};

const PITCH_SLOT_SELECT: &str = "SELECT pts.id, pts.pitch_id, pts.time_slot_id, pts.is_available, \
     ts.name, ts.start_time, ts.end_time \
     FROM pitch_time_slots pts JOIN time_slots ts ON ts.id = pts.time_slot_id";

/// Repository for time slots and their attachment to pitches.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: PgPool,
}

impl SlotRepository {
    /// Create a new slot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every time slot ordered by start time.
    pub async fn find_all_time_slots(&self) -> AppResult<Vec<TimeSlot>> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots ORDER BY start_time")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list time slots", e))
    }

    /// Create a time slot.
    pub async fn create_time_slot(&self, data: &CreateTimeSlot) -> AppResult<TimeSlot> {
        sqlx::query_as::<_, TimeSlot>(
            "INSERT INTO time_slots (id, name, start_time, end_time) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(data.start_time)
        .bind(data.end_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("time_slots_name_key") =>
            {
                AppError::conflict(format!("Time slot '{}' already exists", data.name))
                    .on_field("name")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("time_slots_ordered") =>
            {
                AppError::field("end_time", "End time must be after start time")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create time slot", e),
        })
    }

    /// Attach a time slot to a pitch.
    pub async fn attach(
        &self,
        pitch_id: Uuid,
        time_slot_id: Uuid,
        is_available: bool,
    ) -> AppResult<PitchTimeSlot> {
        sqlx::query_as::<_, PitchTimeSlot>(
            "INSERT INTO pitch_time_slots (id, pitch_id, time_slot_id, is_available) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(pitch_id)
        .bind(time_slot_id)
        .bind(is_available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("pitch_time_slots_unique") =>
            {
                AppError::conflict("Time slot is already attached to this pitch")
                    .on_field("time_slot_id")
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::field("time_slot_id", "Unknown pitch or time slot")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to attach time slot", e),
        })
    }

    /// Find a pitch time slot joined with its time slot.
    pub async fn find_pitch_slot(&self, id: Uuid) -> AppResult<Option<PitchSlot>> {
        sqlx::query_as::<_, PitchSlot>(&format!("{PITCH_SLOT_SELECT} WHERE pts.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pitch slot", e))
    }

    /// List the slots attached to a pitch ordered by start time.
    pub async fn find_by_pitch(&self, pitch_id: Uuid) -> AppResult<Vec<PitchSlot>> {
        sqlx::query_as::<_, PitchSlot>(&format!(
            "{PITCH_SLOT_SELECT} WHERE pts.pitch_id = $1 ORDER BY ts.start_time"
        ))
        .bind(pitch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pitch slots", e))
    }
}
