//! Voucher repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::voucher::{CreateVoucher, Voucher};

/// Repository for voucher administration and lookups.
#[derive(Debug, Clone)]
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    /// Create a new voucher repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a voucher by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Voucher>> {
        sqlx::query_as::<_, Voucher>("SELECT * FROM vouchers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find voucher", e))
    }

    /// Find a voucher by its exact code.
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Voucher>> {
        sqlx::query_as::<_, Voucher>("SELECT * FROM vouchers WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find voucher by code", e)
            })
    }

    /// Whether the user already holds a booking that redeemed the voucher.
    pub async fn used_by(&self, user_id: Uuid, voucher_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE user_id = $1 AND voucher_id = $2)",
        )
        .bind(user_id)
        .bind(voucher_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check voucher usage", e))
    }

    /// List vouchers, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Voucher>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vouchers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count vouchers", e))?;

        let vouchers = sqlx::query_as::<_, Voucher>(
            "SELECT * FROM vouchers ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list vouchers", e))?;

        Ok(PageResponse::new(
            vouchers,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a voucher.
    pub async fn create(&self, data: &CreateVoucher) -> AppResult<Voucher> {
        sqlx::query_as::<_, Voucher>(
            "INSERT INTO vouchers (id, code, description, discount_percent, min_order_value, \
             usage_limit, start_date, end_date, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.code)
        .bind(&data.description)
        .bind(data.discount_percent)
        .bind(data.min_order_value)
        .bind(data.usage_limit)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("vouchers_code_key") => {
                AppError::conflict(format!("Voucher code '{}' already exists", data.code))
                    .on_field("code")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create voucher", e),
        })
    }
}
