//! In-memory booking store using a Tokio mutex for single-node deployments
//! and tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use pitchhub_core::error::AppError;
use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::booking::{Booking, BookingDetail, BookingStatus, NewBooking};
use pitchhub_entity::pitch::Pitch;
use pitchhub_entity::slot::{PitchSlot, PitchTimeSlot, TimeSlot};
use pitchhub_entity::user::User;
use pitchhub_entity::voucher::Voucher;

use super::{BookingFilter, BookingStore, InsertOutcome};

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<Uuid, User>,
    pitches: HashMap<Uuid, Pitch>,
    time_slots: HashMap<Uuid, TimeSlot>,
    pitch_slots: HashMap<Uuid, PitchTimeSlot>,
    vouchers: HashMap<Uuid, Voucher>,
    /// Insertion order doubles as creation order.
    bookings: Vec<Booking>,
}

impl InnerState {
    fn pitch_slot(&self, id: Uuid) -> Option<PitchSlot> {
        let binding = self.pitch_slots.get(&id)?;
        let slot = self.time_slots.get(&binding.time_slot_id)?;
        Some(PitchSlot {
            id: binding.id,
            pitch_id: binding.pitch_id,
            time_slot_id: binding.time_slot_id,
            is_available: binding.is_available,
            name: slot.name.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        })
    }

    fn detail(&self, booking: &Booking) -> AppResult<BookingDetail> {
        let pitch = self
            .pitches
            .get(&booking.pitch_id)
            .ok_or_else(|| AppError::internal("Booking references a missing pitch"))?;
        let slot = self
            .pitch_slot(booking.pitch_time_slot_id)
            .ok_or_else(|| AppError::internal("Booking references a missing slot"))?;
        let user = self
            .users
            .get(&booking.user_id)
            .ok_or_else(|| AppError::internal("Booking references a missing user"))?;
        let voucher_code = booking
            .voucher_id
            .and_then(|id| self.vouchers.get(&id))
            .map(|v| v.code.clone());

        Ok(BookingDetail {
            booking: booking.clone(),
            pitch_name: pitch.name.clone(),
            slot_name: slot.name,
            username: user.username.clone(),
            user_email: user.email.clone(),
            user_full_name: user.full_name.clone(),
            voucher_code,
        })
    }

    fn slot_taken(&self, pitch_time_slot_id: Uuid, date: NaiveDate) -> bool {
        self.bookings.iter().any(|b| {
            b.pitch_time_slot_id == pitch_time_slot_id
                && b.booking_date == date
                && b.status.blocks_slot()
        })
    }
}

/// In-memory booking store.
///
/// Every operation runs under one lock, so the insert path observes the
/// same invariants the PostgreSQL indexes enforce.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub async fn put_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Add or replace a pitch.
    pub async fn put_pitch(&self, pitch: Pitch) {
        self.state.lock().await.pitches.insert(pitch.id, pitch);
    }

    /// Add or replace a time slot.
    pub async fn put_time_slot(&self, slot: TimeSlot) {
        self.state.lock().await.time_slots.insert(slot.id, slot);
    }

    /// Attach a time slot to a pitch.
    pub async fn attach_slot(
        &self,
        pitch_id: Uuid,
        time_slot_id: Uuid,
        is_available: bool,
    ) -> PitchTimeSlot {
        let binding = PitchTimeSlot {
            id: Uuid::now_v7(),
            pitch_id,
            time_slot_id,
            is_available,
        };
        self.state
            .lock()
            .await
            .pitch_slots
            .insert(binding.id, binding.clone());
        binding
    }

    /// Add or replace a voucher.
    pub async fn put_voucher(&self, voucher: Voucher) {
        self.state.lock().await.vouchers.insert(voucher.id, voucher);
    }

    /// Store a booking as-is, bypassing every check.
    pub async fn put_booking(&self, booking: Booking) {
        self.state.lock().await.bookings.push(booking);
    }

    /// Current state of a voucher.
    pub async fn voucher(&self, id: Uuid) -> Option<Voucher> {
        self.state.lock().await.vouchers.get(&id).cloned()
    }

    /// Current state of a booking.
    pub async fn booking(&self, id: Uuid) -> Option<Booking> {
        self.state
            .lock()
            .await
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Number of stored bookings.
    pub async fn booking_count(&self) -> usize {
        self.state.lock().await.bookings.len()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn find_pitch(&self, id: Uuid) -> AppResult<Option<Pitch>> {
        Ok(self.state.lock().await.pitches.get(&id).cloned())
    }

    async fn find_pitch_slot(&self, id: Uuid) -> AppResult<Option<PitchSlot>> {
        Ok(self.state.lock().await.pitch_slot(id))
    }

    async fn list_pitch_slots(&self, pitch_id: Uuid) -> AppResult<Vec<PitchSlot>> {
        let state = self.state.lock().await;
        let mut slots: Vec<PitchSlot> = state
            .pitch_slots
            .values()
            .filter(|b| b.pitch_id == pitch_id)
            .filter_map(|b| state.pitch_slot(b.id))
            .collect();
        slots.sort_by_key(|s| (s.start_time, s.id));
        Ok(slots)
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_voucher_by_code(&self, code: &str) -> AppResult<Option<Voucher>> {
        Ok(self
            .state
            .lock()
            .await
            .vouchers
            .values()
            .find(|v| v.code == code)
            .cloned())
    }

    async fn voucher_used_by(&self, user_id: Uuid, voucher_id: Uuid) -> AppResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .bookings
            .iter()
            .any(|b| b.user_id == user_id && b.voucher_id == Some(voucher_id)))
    }

    async fn is_slot_taken(
        &self,
        pitch_id: Uuid,
        pitch_time_slot_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.bookings.iter().any(|b| {
            b.pitch_id == pitch_id
                && b.pitch_time_slot_id == pitch_time_slot_id
                && b.booking_date == date
                && b.status.blocks_slot()
        }))
    }

    async fn taken_slot_ids(&self, pitch_id: Uuid, date: NaiveDate) -> AppResult<HashSet<Uuid>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.pitch_id == pitch_id && b.booking_date == date && b.status.blocks_slot())
            .map(|b| b.pitch_time_slot_id)
            .collect())
    }

    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<InsertOutcome> {
        let mut state = self.state.lock().await;

        if state.slot_taken(booking.pitch_time_slot_id, booking.booking_date) {
            return Ok(InsertOutcome::SlotTaken);
        }

        if let Some(voucher_id) = booking.voucher_id {
            let already_used = state
                .bookings
                .iter()
                .any(|b| b.user_id == booking.user_id && b.voucher_id == Some(voucher_id));
            if already_used {
                return Ok(InsertOutcome::VoucherAlreadyUsed);
            }

            let voucher = state
                .vouchers
                .get_mut(&voucher_id)
                .ok_or_else(|| AppError::not_found("Voucher not found"))?;
            if voucher.is_exhausted() {
                debug!(voucher_id = %voucher_id, "Voucher exhausted at commit");
                return Ok(InsertOutcome::VoucherExhausted);
            }
            voucher.used_count += 1;
        }

        let now = Utc::now();
        let stored = Booking {
            id: Uuid::now_v7(),
            user_id: booking.user_id,
            pitch_id: booking.pitch_id,
            pitch_time_slot_id: booking.pitch_time_slot_id,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            duration_hours: booking.duration_hours,
            final_price: booking.final_price,
            voucher_id: booking.voucher_id,
            note: booking.note.clone(),
            status: BookingStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        state.bookings.push(stored.clone());

        Ok(InsertOutcome::Created(stored))
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<BookingDetail>> {
        let state = self.state.lock().await;
        state
            .bookings
            .iter()
            .find(|b| b.id == id)
            .map(|b| state.detail(b))
            .transpose()
    }

    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Option<Booking>> {
        let mut state = self.state.lock().await;
        let Some(booking) = state
            .bookings
            .iter_mut()
            .find(|b| b.id == id && b.status == from)
        else {
            return Ok(None);
        };

        booking.status = to;
        if let Some(reason) = rejection_reason {
            booking.rejection_reason = Some(reason.to_string());
        }
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        let state = self.state.lock().await;
        let details = state
            .bookings
            .iter()
            .rev()
            .filter(|b| filter.user_id.is_none_or(|u| b.user_id == u))
            .filter(|b| filter.status.is_none_or(|s| b.status == s))
            .map(|b| state.detail(b))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PageResponse::from_vec(details, page))
    }
}
