//! Voucher entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A percentage discount code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Voucher {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique code typed by users.
    pub code: String,
    /// Optional description.
    pub description: Option<String>,
    /// Discount in percent, 0 to 100.
    pub discount_percent: i32,
    /// Minimum order value. Stored for display, not enforced.
    pub min_order_value: Option<Decimal>,
    /// Maximum number of redemptions, unlimited when `None`.
    pub usage_limit: Option<i32>,
    /// Number of bookings that redeemed this voucher.
    pub used_count: i32,
    /// First day the voucher is valid.
    pub start_date: Option<NaiveDate>,
    /// Last day the voucher is valid.
    pub end_date: Option<NaiveDate>,
    /// Master switch.
    pub is_active: bool,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
}

impl Voucher {
    /// Whether the usage cap has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.used_count >= limit)
    }
}

/// Data required to create a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucher {
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: i32,
    pub min_order_value: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}
