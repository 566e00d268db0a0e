//! Pure voucher usability rules.

use std::fmt;

use chrono::NaiveDate;

use pitchhub_core::error::AppError;
use pitchhub_core::result::AppResult;
use pitchhub_entity::voucher::Voucher;

/// Longest accepted voucher code.
pub const CODE_MAX_LENGTH: usize = 50;

/// Why a voucher was not applied to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherRejection {
    /// No voucher has this code.
    Unknown,
    /// The voucher is switched off.
    Inactive,
    /// Today is before the start date.
    NotStarted,
    /// Today is after the end date.
    Expired,
    /// The usage cap has been reached.
    Exhausted,
    /// This user already redeemed it.
    AlreadyUsed,
}

impl fmt::Display for VoucherRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Unknown => "Voucher code does not exist",
            Self::Inactive | Self::NotStarted | Self::Expired => {
                "Voucher code is invalid or has expired"
            }
            Self::Exhausted => "Voucher code has reached its usage limit",
            Self::AlreadyUsed => "You have already used this voucher code",
        };
        f.write_str(msg)
    }
}

/// Check the voucher's own state on `today`. Per-user usage is checked separately.
pub fn check_usable(voucher: &Voucher, today: NaiveDate) -> Result<(), VoucherRejection> {
    if !voucher.is_active {
        return Err(VoucherRejection::Inactive);
    }
    if voucher.start_date.is_some_and(|start| today < start) {
        return Err(VoucherRejection::NotStarted);
    }
    if voucher.end_date.is_some_and(|end| today > end) {
        return Err(VoucherRejection::Expired);
    }
    if voucher.is_exhausted() {
        return Err(VoucherRejection::Exhausted);
    }
    Ok(())
}

/// Reject codes outside `[A-Za-z0-9_-]{1,50}` on `field`.
pub fn validate_code_format(code: &str, field: &str) -> AppResult<()> {
    if code.is_empty() {
        return Err(AppError::field(field, "Voucher code cannot be empty"));
    }
    if code.chars().count() > CODE_MAX_LENGTH {
        return Err(AppError::field(
            field,
            format!("Voucher code must be at most {CODE_MAX_LENGTH} characters"),
        ));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::field(
            field,
            "Voucher code may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}
