//! Slot conflict checks and the per-date slot board.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchhub_core::error::AppError;
use pitchhub_core::result::AppResult;
use pitchhub_database::store::BookingStore;

use super::pricing::PriceQuote;

/// One row of the slot board for a pitch on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// Pitch time slot to pass when booking.
    pub pitch_time_slot_id: Uuid,
    pub time_slot_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// `HH:MM - HH:MM`.
    pub time_range: String,
    pub duration_hours: Decimal,
    /// Undiscounted price of the slot.
    pub price: Decimal,
    /// Held by a Pending or Confirmed booking.
    pub taken: bool,
    /// Bookable right now.
    pub available: bool,
}

/// Answers whether a (pitch, slot, date) triple is free.
#[derive(Clone)]
pub struct AvailabilityChecker {
    store: Arc<dyn BookingStore>,
}

impl std::fmt::Debug for AvailabilityChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityChecker").finish_non_exhaustive()
    }
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// `true` when no Pending or Confirmed booking holds the triple.
    ///
    /// Advisory only. The store rejects a conflicting insert on its own.
    pub async fn is_available(
        &self,
        pitch_id: Uuid,
        pitch_time_slot_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool> {
        Ok(!self
            .store
            .is_slot_taken(pitch_id, pitch_time_slot_id, date)
            .await?)
    }

    /// Every slot attached to the pitch with its state on `date`.
    pub async fn slot_board(
        &self,
        pitch_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Vec<SlotAvailability>> {
        let pitch = self
            .store
            .find_pitch(pitch_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Pitch {pitch_id} not found")))?;

        let slots = self.store.list_pitch_slots(pitch_id).await?;
        let taken = self.store.taken_slot_ids(pitch_id, date).await?;
        let bookable_date = date >= today;

        let mut board = Vec::with_capacity(slots.len());
        for slot in slots {
            let quote =
                PriceQuote::for_slot(pitch.base_price_per_hour, slot.start_time, slot.end_time)?;
            let is_taken = taken.contains(&slot.id);
            board.push(SlotAvailability {
                pitch_time_slot_id: slot.id,
                time_slot_id: slot.time_slot_id,
                time_range: slot.time_range(),
                name: slot.name,
                start_time: slot.start_time,
                end_time: slot.end_time,
                duration_hours: quote.duration_hours,
                price: quote.base_price,
                taken: is_taken,
                available: slot.is_available && pitch.is_available && !is_taken && bookable_date,
            });
        }
        Ok(board)
    }
}
