//! Voucher administration service.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use pitchhub_auth::rbac::{Capability, RbacEnforcer};
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_database::repositories::VoucherRepository;
use pitchhub_entity::voucher::{CreateVoucher, Voucher};

use super::rules::validate_code_format;
use crate::context::RequestContext;

/// Request to create a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    pub code: String,
    pub description: Option<String>,
    pub discount_percent: i32,
    pub min_order_value: Option<Decimal>,
    pub usage_limit: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl CreateVoucherRequest {
    /// Check the invariants a voucher row must hold.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_code_format(&self.code, "code")?;
        if !(0..=100).contains(&self.discount_percent) {
            return Err(AppError::field(
                "discount_percent",
                "Discount must be between 0 and 100",
            ));
        }
        if self.usage_limit.is_some_and(|limit| limit < 0) {
            return Err(AppError::field("usage_limit", "Usage limit cannot be negative"));
        }
        if self.min_order_value.is_some_and(|v| v.is_sign_negative()) {
            return Err(AppError::field(
                "min_order_value",
                "Minimum order value cannot be negative",
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::field(
                    "end_date",
                    "End date must not be before start date",
                ));
            }
        }
        Ok(())
    }
}

/// Manages vouchers on behalf of administrators.
#[derive(Debug, Clone)]
pub struct VoucherService {
    /// Voucher repository.
    voucher_repo: Arc<VoucherRepository>,
    /// Capability gate.
    rbac: Arc<RbacEnforcer>,
}

impl VoucherService {
    /// Creates a new voucher service.
    pub fn new(voucher_repo: Arc<VoucherRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { voucher_repo, rbac }
    }

    /// Creates a voucher.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateVoucherRequest,
    ) -> Result<Voucher, AppError> {
        self.rbac.require(ctx.role, Capability::ManageVouchers)?;
        req.validate()?;

        let voucher = self
            .voucher_repo
            .create(&CreateVoucher {
                code: req.code,
                description: req.description,
                discount_percent: req.discount_percent,
                min_order_value: req.min_order_value,
                usage_limit: req.usage_limit,
                start_date: req.start_date,
                end_date: req.end_date,
                is_active: req.is_active,
            })
            .await?;

        info!(
            voucher_id = %voucher.id,
            code = %voucher.code,
            created_by = %ctx.user_id,
            "Voucher created"
        );
        Ok(voucher)
    }

    /// Lists vouchers, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Voucher>, AppError> {
        self.rbac.require(ctx.role, Capability::ManageVouchers)?;
        self.voucher_repo.find_all(&page).await
    }
}
