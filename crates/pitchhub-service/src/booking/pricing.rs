//! Duration and price arithmetic for bookings.
//!
//! Every function here is pure. The orchestrator calls them before
//! persisting; nothing recomputes prices on save.

use chrono::NaiveTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use pitchhub_core::error::AppError;
use pitchhub_core::result::AppResult;

/// Billable minutes are counted in steps of this size; partial steps are dropped.
pub const BILLING_STEP_MINUTES: i64 = 15;

/// Money and durations carry two decimal places.
const SCALE: u32 = 2;

fn round(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(SCALE);
    rounded
}

/// Billable duration between `start` and `end`, in hours.
///
/// Minutes are floored to a multiple of [`BILLING_STEP_MINUTES`].
/// 07:00 to 09:00 is `2.00`, 07:00 to 08:30 is `1.50`.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> AppResult<Decimal> {
    if end <= start {
        return Err(AppError::field(
            "time_slot",
            "Time slot must end after it starts",
        ));
    }
    let minutes = (end - start).num_minutes();
    let billable = minutes - minutes % BILLING_STEP_MINUTES;
    Ok(round(Decimal::from(billable) / Decimal::from(60)))
}

/// Hourly rate times duration.
pub fn base_price(rate_per_hour: Decimal, hours: Decimal) -> Decimal {
    round(rate_per_hour * hours)
}

/// Price after a percentage discount. `percent` is clamped to 0..=100.
pub fn apply_discount(base: Decimal, percent: i32) -> Decimal {
    let percent = Decimal::from(percent.clamp(0, 100));
    round(base * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED)
}

/// The full price breakdown of one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub duration_hours: Decimal,
    pub base_price: Decimal,
    /// Applied discount, if a voucher was accepted.
    pub discount_percent: Option<i32>,
    pub final_price: Decimal,
}

impl PriceQuote {
    /// Quote a slot at the given hourly rate without any discount.
    pub fn for_slot(rate_per_hour: Decimal, start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        let duration_hours = duration_hours(start, end)?;
        let base_price = base_price(rate_per_hour, duration_hours);
        Ok(Self {
            duration_hours,
            base_price,
            discount_percent: None,
            final_price: base_price,
        })
    }

    /// Apply a discount to the base price.
    pub fn with_discount(self, percent: i32) -> Self {
        Self {
            discount_percent: Some(percent),
            final_price: apply_discount(self.base_price, percent),
            ..self
        }
    }
}
