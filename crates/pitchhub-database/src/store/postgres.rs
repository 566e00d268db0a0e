//! PostgreSQL-backed booking store.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::booking::{Booking, BookingDetail, BookingStatus, NewBooking};
use pitchhub_entity::pitch::Pitch;
use pitchhub_entity::slot::PitchSlot;
use pitchhub_entity::user::User;
use pitchhub_entity::voucher::Voucher;

use super::{BookingFilter, BookingStore, InsertOutcome};
use crate::repositories::{
    BookingRepository, PitchRepository, SlotRepository, UserRepository, VoucherRepository,
};

/// Booking store over the sqlx repositories.
#[derive(Debug, Clone)]
pub struct PgBookingStore {
    pitches: PitchRepository,
    slots: SlotRepository,
    users: UserRepository,
    vouchers: VoucherRepository,
    bookings: BookingRepository,
}

impl PgBookingStore {
    /// Create a store sharing the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pitches: PitchRepository::new(pool.clone()),
            slots: SlotRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            vouchers: VoucherRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool),
        }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find_pitch(&self, id: Uuid) -> AppResult<Option<Pitch>> {
        self.pitches.find_by_id(id).await
    }

    async fn find_pitch_slot(&self, id: Uuid) -> AppResult<Option<PitchSlot>> {
        self.slots.find_pitch_slot(id).await
    }

    async fn list_pitch_slots(&self, pitch_id: Uuid) -> AppResult<Vec<PitchSlot>> {
        self.slots.find_by_pitch(pitch_id).await
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_voucher_by_code(&self, code: &str) -> AppResult<Option<Voucher>> {
        self.vouchers.find_by_code(code).await
    }

    async fn voucher_used_by(&self, user_id: Uuid, voucher_id: Uuid) -> AppResult<bool> {
        self.vouchers.used_by(user_id, voucher_id).await
    }

    async fn is_slot_taken(
        &self,
        pitch_id: Uuid,
        pitch_time_slot_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool> {
        self.bookings
            .is_slot_taken(pitch_id, pitch_time_slot_id, date)
            .await
    }

    async fn taken_slot_ids(&self, pitch_id: Uuid, date: NaiveDate) -> AppResult<HashSet<Uuid>> {
        self.bookings.taken_slot_ids(pitch_id, date).await
    }

    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<InsertOutcome> {
        self.bookings.insert(booking).await
    }

    async fn find_booking(&self, id: Uuid) -> AppResult<Option<BookingDetail>> {
        self.bookings.find_detail(id).await
    }

    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Option<Booking>> {
        self.bookings
            .transition(id, from, to, rejection_reason)
            .await
    }

    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        self.bookings.find_all(filter, page).await
    }
}
