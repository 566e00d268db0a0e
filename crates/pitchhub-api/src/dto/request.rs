//! Request DTOs with validation.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150, message = "Username must be 3 to 150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid e-mail address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Booking creation body. `time_slot_id` is the pitch time slot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub pitch_id: Uuid,
    pub time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub voucher_code: Option<String>,
    #[validate(length(max = 1000, message = "Note is too long"))]
    pub note: Option<String>,
}

/// Admin rejection body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RejectBookingRequest {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Review body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1, max = 2000, message = "Review content cannot be empty"))]
    pub content: String,
}

/// Comment body. `parent_id` makes it a reply.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment cannot be empty"))]
    pub content: String,
    pub parent_id: Option<Uuid>,
}

/// Pitch type body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePitchTypeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// Pitch creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePitchRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    pub description: Option<String>,
    pub pitch_type_id: Uuid,
    pub base_price_per_hour: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Partial pitch update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePitchRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    pub description: Option<String>,
    pub pitch_type_id: Option<Uuid>,
    pub base_price_per_hour: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Time slot body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTimeSlotRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Voucher body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVoucherRequest {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount_percent: i32,
    pub min_order_value: Option<Decimal>,
    #[validate(range(min = 0))]
    pub usage_limit: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// `?date=` on the slot board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotBoardQuery {
    pub date: Option<NaiveDate>,
}

/// Admin booking list query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminBookingsQuery {
    pub status: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

fn default_true() -> bool {
    true
}
