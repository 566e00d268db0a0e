//! Resolves a user-supplied voucher code into an applicable voucher.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use pitchhub_core::result::AppResult;
use pitchhub_database::store::BookingStore;
use pitchhub_entity::voucher::Voucher;

use super::rules::{VoucherRejection, check_usable};

/// Outcome of resolving a voucher code for one booking.
#[derive(Debug, Clone)]
pub enum VoucherDecision {
    /// Apply this voucher.
    Apply(Voucher),
    /// Book at full price; the reason is surfaced as a warning.
    Ignore(VoucherRejection),
}

/// Checks whether a code may be applied by a given user today.
#[derive(Clone)]
pub struct VoucherValidator {
    store: Arc<dyn BookingStore>,
}

impl std::fmt::Debug for VoucherValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoucherValidator").finish_non_exhaustive()
    }
}

impl VoucherValidator {
    /// Creates a validator over the booking store.
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Resolve `code` for `user_id`. The code must already be well-formed.
    pub async fn resolve(
        &self,
        user_id: Uuid,
        code: &str,
        today: NaiveDate,
    ) -> AppResult<VoucherDecision> {
        let Some(voucher) = self.store.find_voucher_by_code(code).await? else {
            debug!(code = %code, "Unknown voucher code");
            return Ok(VoucherDecision::Ignore(VoucherRejection::Unknown));
        };

        if let Err(rejection) = check_usable(&voucher, today) {
            debug!(code = %code, ?rejection, "Voucher not usable");
            return Ok(VoucherDecision::Ignore(rejection));
        }

        if self.store.voucher_used_by(user_id, voucher.id).await? {
            debug!(code = %code, user_id = %user_id, "Voucher already used by user");
            return Ok(VoucherDecision::Ignore(VoucherRejection::AlreadyUsed));
        }

        Ok(VoucherDecision::Apply(voucher))
    }
}
