//! Booking orchestrator.
//!
//! Validates a booking request, prices it, applies a voucher and persists
//! it through the [`BookingStore`]. Also drives the lifecycle:
//!
//! ```text
//! Pending --approve--> Confirmed --cancel--> Cancelled
//!    |  \--reject---> Rejected
//!    \----cancel----> Cancelled
//! ```
//!
//! Notifications go out after the store has committed.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::config::BookingConfig;
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_database::store::{BookingFilter, BookingStore, InsertOutcome};
use pitchhub_entity::booking::{BookingDetail, BookingStatus, NewBooking};

use super::availability::{AvailabilityChecker, SlotAvailability};
use super::pricing::PriceQuote;
use crate::context::RequestContext;
use crate::notification::BookingNotifier;
use crate::voucher::{VoucherDecision, VoucherRejection, VoucherValidator, validate_code_format};

/// Request to book one pitch time slot on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub pitch_id: Uuid,
    /// The pitch time slot, i.e. a slot attached to `pitch_id`.
    pub time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub voucher_code: Option<String>,
    pub note: Option<String>,
}

/// A stored booking plus any soft failures met on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub booking: BookingDetail,
    pub warnings: Vec<String>,
}

/// Creates bookings and moves them through their lifecycle.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    availability: AvailabilityChecker,
    vouchers: VoucherValidator,
    notifier: Arc<BookingNotifier>,
    rbac: Arc<RbacEnforcer>,
    config: BookingConfig,
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        store: Arc<dyn BookingStore>,
        notifier: Arc<BookingNotifier>,
        rbac: Arc<RbacEnforcer>,
        config: BookingConfig,
    ) -> Self {
        Self {
            availability: AvailabilityChecker::new(Arc::clone(&store)),
            vouchers: VoucherValidator::new(Arc::clone(&store)),
            store,
            notifier,
            rbac,
            config,
        }
    }

    /// Page request sized for booking history lists.
    pub fn page_request(&self, page: u64) -> PageRequest {
        PageRequest::new(page, self.config.bookings_page_size)
    }

    /// Creates a Pending booking.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateBookingRequest,
    ) -> Result<BookingOutcome, AppError> {
        self.rbac.require(ctx.role, Capability::BookPitch)?;

        let voucher_code = req
            .voucher_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());
        if let Some(code) = voucher_code {
            validate_code_format(code, "voucher_code")?;
        }

        self.check_date(req.booking_date, ctx.today())?;

        let pitch = self
            .store
            .find_pitch(req.pitch_id)
            .await?
            .ok_or_else(|| AppError::field("pitch", "Pitch does not exist"))?;
        if !pitch.is_available {
            return Err(AppError::field(
                "pitch",
                format!("Pitch {} is currently unavailable", pitch.name),
            ));
        }

        let slot = self
            .store
            .find_pitch_slot(req.time_slot_id)
            .await?
            .filter(|slot| slot.pitch_id == pitch.id)
            .ok_or_else(|| {
                AppError::field("time_slot", "Time slot does not belong to this pitch")
            })?;
        if !slot.is_available {
            return Err(AppError::field(
                "time_slot",
                format!("Time slot {} is not available", slot.name),
            ));
        }

        if !self
            .availability
            .is_available(pitch.id, slot.id, req.booking_date)
            .await?
        {
            return Err(slot_taken(&slot.name));
        }

        let base = PriceQuote::for_slot(pitch.base_price_per_hour, slot.start_time, slot.end_time)?;
        let mut warnings = Vec::new();
        let mut quote = base;
        let mut voucher_id = None;

        if let Some(code) = voucher_code {
            match self.vouchers.resolve(ctx.user_id, code, ctx.today()).await? {
                VoucherDecision::Apply(voucher) => {
                    quote = base.with_discount(voucher.discount_percent);
                    voucher_id = Some(voucher.id);
                }
                VoucherDecision::Ignore(rejection) => warnings.push(rejection.to_string()),
            }
        }

        let note = req
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let new_booking = NewBooking {
            user_id: ctx.user_id,
            pitch_id: pitch.id,
            pitch_time_slot_id: slot.id,
            booking_date: req.booking_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            duration_hours: quote.duration_hours,
            final_price: quote.final_price,
            voucher_id,
            note,
        };

        let booking = match self.store.insert_booking(&new_booking).await? {
            InsertOutcome::Created(booking) => booking,
            InsertOutcome::SlotTaken => return Err(slot_taken(&slot.name)),
            outcome @ (InsertOutcome::VoucherExhausted | InsertOutcome::VoucherAlreadyUsed) => {
                let rejection = if matches!(outcome, InsertOutcome::VoucherExhausted) {
                    VoucherRejection::Exhausted
                } else {
                    VoucherRejection::AlreadyUsed
                };
                warn!(
                    user_id = %ctx.user_id,
                    ?rejection,
                    "Voucher lost at commit, retrying without it"
                );
                warnings.push(rejection.to_string());

                let retry = new_booking.without_voucher(base.base_price);
                match self.store.insert_booking(&retry).await? {
                    InsertOutcome::Created(booking) => booking,
                    InsertOutcome::SlotTaken => return Err(slot_taken(&slot.name)),
                    _ => return Err(AppError::internal("Voucher-free booking insert failed")),
                }
            }
        };

        let detail = self.detail(booking.id).await?;

        info!(
            booking_id = %booking.id,
            user_id = %ctx.user_id,
            pitch_id = %pitch.id,
            date = %booking.booking_date,
            final_price = %booking.final_price,
            voucher = booking.voucher_id.is_some(),
            "Booking created"
        );

        self.notifier.booking_created(&detail).await;

        Ok(BookingOutcome {
            booking: detail,
            warnings,
        })
    }

    /// Approves a Pending booking.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<BookingDetail, AppError> {
        self.rbac.require(ctx.role, Capability::ManageBookings)?;
        let current = self.detail(booking_id).await?;
        if !current.booking.status.can_decide() {
            return Err(AppError::state_transition(format!(
                "Only pending bookings can be approved (booking is {})",
                current.booking.status
            )));
        }

        let detail = self
            .move_to(booking_id, BookingStatus::Pending, BookingStatus::Confirmed, None)
            .await?;
        info!(booking_id = %booking_id, admin_id = %ctx.user_id, "Booking approved");

        self.notifier.booking_approved(&detail).await;
        Ok(detail)
    }

    /// Rejects a Pending booking. A blank reason falls back to the configured default.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<BookingDetail, AppError> {
        self.rbac.require(ctx.role, Capability::ManageBookings)?;
        let current = self.detail(booking_id).await?;
        if !current.booking.status.can_decide() {
            return Err(AppError::state_transition(format!(
                "Only pending bookings can be rejected (booking is {})",
                current.booking.status
            )));
        }

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.config.default_rejection_reason.clone());

        let detail = self
            .move_to(
                booking_id,
                BookingStatus::Pending,
                BookingStatus::Rejected,
                Some(&reason),
            )
            .await?;
        info!(booking_id = %booking_id, admin_id = %ctx.user_id, "Booking rejected");

        self.notifier.booking_rejected(&detail, &reason).await;
        Ok(detail)
    }

    /// Cancels a Pending or Confirmed booking on behalf of its owner or an admin.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<BookingDetail, AppError> {
        let current = self.detail(booking_id).await?;
        if current.booking.user_id == ctx.user_id {
            self.rbac.require(ctx.role, Capability::CancelOwnBooking)?;
        } else if !self.rbac.has_capability(ctx.role, Capability::ManageBookings) {
            return Err(not_found(booking_id));
        }

        let from = current.booking.status;
        if !from.can_cancel() {
            return Err(AppError::state_transition(format!(
                "Booking cannot be cancelled (booking is {from})"
            )));
        }

        let detail = self
            .move_to(booking_id, from, BookingStatus::Cancelled, None)
            .await?;
        info!(booking_id = %booking_id, actor_id = %ctx.user_id, "Booking cancelled");

        self.notifier.booking_cancelled(&detail).await;
        Ok(detail)
    }

    /// Fetches one booking visible to the caller.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<BookingDetail, AppError> {
        let detail = self.detail(booking_id).await?;
        if detail.booking.user_id != ctx.user_id
            && !self.rbac.has_capability(ctx.role, Capability::ManageBookings)
        {
            return Err(not_found(booking_id));
        }
        Ok(detail)
    }

    /// The caller's booking history, newest first.
    pub async fn list_own(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<BookingDetail>, AppError> {
        let filter = BookingFilter {
            user_id: Some(ctx.user_id),
            status: None,
        };
        self.store.list_bookings(&filter, page).await
    }

    /// Every booking, optionally filtered by status. Admin only.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<BookingDetail>, AppError> {
        self.rbac.require(ctx.role, Capability::ManageBookings)?;
        let filter = BookingFilter {
            user_id: None,
            status,
        };
        self.store.list_bookings(&filter, page).await
    }

    /// Slot board for a pitch on `date`, evaluated against `today`.
    pub async fn slot_board(
        &self,
        pitch_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, AppError> {
        self.availability.slot_board(pitch_id, date, today).await
    }

    fn check_date(&self, date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
        if date < today {
            return Err(AppError::field(
                "booking_date",
                "Cannot book a date in the past",
            ));
        }
        // A window too large to represent has no upper bound.
        let last = Duration::try_days(self.config.max_advance_days)
            .and_then(|window| today.checked_add_signed(window));
        if last.is_some_and(|last| date > last) {
            return Err(AppError::field(
                "booking_date",
                format!(
                    "Bookings can only be made up to {} days in advance",
                    self.config.max_advance_days
                ),
            ));
        }
        Ok(())
    }

    async fn detail(&self, booking_id: Uuid) -> Result<BookingDetail, AppError> {
        self.store
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| not_found(booking_id))
    }

    /// Compare-and-set, then re-read the joined view.
    async fn move_to(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
        reason: Option<&str>,
    ) -> Result<BookingDetail, AppError> {
        if !from.can_transition_to(to) {
            return Err(AppError::state_transition(format!(
                "Cannot move booking from {from} to {to}"
            )));
        }
        self.store
            .transition(booking_id, from, to, reason)
            .await?
            .ok_or_else(|| {
                AppError::state_transition(format!(
                    "Booking {booking_id} is no longer {from}"
                ))
            })?;
        self.detail(booking_id).await
    }
}

fn slot_taken(slot_name: &str) -> AppError {
    AppError::field(
        "time_slot",
        format!("Time slot {slot_name} is already booked on this date"),
    )
}

fn not_found(booking_id: Uuid) -> AppError {
    AppError::not_found(format!("Booking {booking_id} not found"))
}
