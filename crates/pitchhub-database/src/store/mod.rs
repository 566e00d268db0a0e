//! Persistence seam for the booking orchestrator.
//!
//! Two implementations are provided:
//! - [`PgBookingStore`], delegating to the sqlx repositories
//! - [`MemoryBookingStore`], a single-process store behind a `tokio::sync::Mutex`

pub mod memory;
pub mod postgres;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::booking::{Booking, BookingDetail, BookingStatus, NewBooking};
use pitchhub_entity::pitch::Pitch;
use pitchhub_entity::slot::PitchSlot;
use pitchhub_entity::user::User;
use pitchhub_entity::voucher::Voucher;

pub use memory::MemoryBookingStore;
pub use postgres::PgBookingStore;

/// Result of an atomic booking insert.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The booking was stored and its voucher, if any, redeemed.
    Created(Booking),
    /// Another live booking already holds the slot on that date.
    SlotTaken,
    /// The voucher hit its usage limit before the commit.
    VoucherExhausted,
    /// The user already redeemed the voucher on another booking.
    VoucherAlreadyUsed,
}

/// Filter for booking listings. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}

/// Storage operations needed to validate, persist and transition bookings.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Find a pitch by ID.
    async fn find_pitch(&self, id: Uuid) -> AppResult<Option<Pitch>>;

    /// Find a pitch time slot joined with its time slot.
    async fn find_pitch_slot(&self, id: Uuid) -> AppResult<Option<PitchSlot>>;

    /// List the slots attached to a pitch ordered by start time.
    async fn list_pitch_slots(&self, pitch_id: Uuid) -> AppResult<Vec<PitchSlot>>;

    /// Find a user by ID.
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a voucher by exact code.
    async fn find_voucher_by_code(&self, code: &str) -> AppResult<Option<Voucher>>;

    /// Whether any booking of the user references the voucher.
    async fn voucher_used_by(&self, user_id: Uuid, voucher_id: Uuid) -> AppResult<bool>;

    /// Whether a Pending or Confirmed booking holds the (pitch, slot, date).
    async fn is_slot_taken(
        &self,
        pitch_id: Uuid,
        pitch_time_slot_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool>;

    /// Pitch time slots of the pitch held by a live booking on the date.
    async fn taken_slot_ids(&self, pitch_id: Uuid, date: NaiveDate) -> AppResult<HashSet<Uuid>>;

    /// Insert a booking and redeem its voucher atomically.
    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<InsertOutcome>;

    /// Find a booking with display names.
    async fn find_booking(&self, id: Uuid) -> AppResult<Option<BookingDetail>>;

    /// Compare-and-set the status. `None` when the booking is not in `from`.
    async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Option<Booking>>;

    /// List bookings newest first.
    async fn list_bookings(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>>;
}
