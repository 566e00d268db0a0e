//! Booking entity model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A reservation of one pitch time slot on one date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique identifier.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Booked pitch.
    pub pitch_id: Uuid,
    /// Booked pitch time slot.
    pub pitch_time_slot_id: Uuid,
    /// Day of play.
    pub booking_date: NaiveDate,
    /// Slot start, copied at creation.
    pub start_time: NaiveTime,
    /// Slot end, copied at creation.
    pub end_time: NaiveTime,
    /// Billed duration in hours.
    pub duration_hours: Decimal,
    /// Amount due after any discount.
    pub final_price: Decimal,
    /// Redeemed voucher, if any.
    pub voucher_id: Option<Uuid>,
    /// Free-form note from the user.
    pub note: Option<String>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Reason given when rejected.
    pub rejection_reason: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A booking about to be inserted. Price and duration are already derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub pitch_id: Uuid,
    pub pitch_time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: Decimal,
    pub final_price: Decimal,
    pub voucher_id: Option<Uuid>,
    pub note: Option<String>,
}

impl NewBooking {
    /// Drop the voucher and reset the price to the undiscounted amount.
    pub fn without_voucher(mut self, base_price: Decimal) -> Self {
        self.voucher_id = None;
        self.final_price = base_price;
        self
    }
}

/// A booking joined with the names needed for listings and e-mails.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    /// Pitch display name.
    pub pitch_name: String,
    /// Time slot label.
    pub slot_name: String,
    /// Owner's username.
    pub username: String,
    /// Owner's e-mail.
    pub user_email: String,
    /// Owner's full name.
    pub user_full_name: String,
    /// Redeemed voucher code.
    pub voucher_code: Option<String>,
}
