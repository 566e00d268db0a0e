//! Booking repository implementation.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::booking::{Booking, BookingDetail, BookingStatus, NewBooking};

use crate::store::{BookingFilter, InsertOutcome};

/// Constraint guarding one live booking per pitch time slot and date.
const LIVE_SLOT_UNIQUE: &str = "bookings_live_slot_unique";
/// Constraint guarding one redemption per user and voucher.
const USER_VOUCHER_UNIQUE: &str = "bookings_user_voucher_unique";

const DETAIL_SELECT: &str = "SELECT b.*, p.name AS pitch_name, ts.name AS slot_name, \
     u.username, u.email AS user_email, u.full_name AS user_full_name, v.code AS voucher_code \
     FROM bookings b \
     JOIN pitches p ON p.id = b.pitch_id \
     JOIN pitch_time_slots pts ON pts.id = b.pitch_time_slot_id \
     JOIN time_slots ts ON ts.id = pts.time_slot_id \
     JOIN users u ON u.id = b.user_id \
     LEFT JOIN vouchers v ON v.id = b.voucher_id";

/// Repository for bookings.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking with its display names.
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<BookingDetail>> {
        sqlx::query_as::<_, BookingDetail>(&format!("{DETAIL_SELECT} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// Whether a Pending or Confirmed booking holds the slot on the date.
    pub async fn is_slot_taken(
        &self,
        pitch_id: Uuid,
        pitch_time_slot_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE pitch_id = $1 \
             AND pitch_time_slot_id = $2 AND booking_date = $3 \
             AND status IN ('pending', 'confirmed'))",
        )
        .bind(pitch_id)
        .bind(pitch_time_slot_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check slot", e))
    }

    /// Pitch time slots of a pitch held by a live booking on the date.
    pub async fn taken_slot_ids(&self, pitch_id: Uuid, date: NaiveDate) -> AppResult<HashSet<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT pitch_time_slot_id FROM bookings WHERE pitch_id = $1 \
             AND booking_date = $2 AND status IN ('pending', 'confirmed')",
        )
        .bind(pitch_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list taken slots", e))?;
        Ok(ids.into_iter().collect())
    }

    /// Whether the user has ever held a Confirmed booking on the pitch.
    pub async fn has_confirmed(&self, user_id: Uuid, pitch_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE user_id = $1 AND pitch_id = $2 \
             AND status = 'confirmed')",
        )
        .bind(user_id)
        .bind(pitch_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check bookings", e))
    }

    /// Insert a booking and redeem its voucher in one transaction.
    ///
    /// The voucher row is locked and its counter bumped only while under
    /// the usage limit. Unique-index violations on the live slot or the
    /// per-user voucher pair are reported as outcomes, not errors.
    pub async fn insert(&self, data: &NewBooking) -> AppResult<InsertOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if let Some(voucher_id) = data.voucher_id {
            sqlx::query("SELECT id FROM vouchers WHERE id = $1 FOR UPDATE")
                .bind(voucher_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock voucher", e))?;

            let redeemed = sqlx::query(
                "UPDATE vouchers SET used_count = used_count + 1 WHERE id = $1 \
                 AND (usage_limit IS NULL OR used_count < usage_limit)",
            )
            .bind(voucher_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to redeem voucher", e))?;

            if redeemed.rows_affected() == 0 {
                debug!(voucher_id = %voucher_id, "Voucher exhausted at commit");
                return Ok(InsertOutcome::VoucherExhausted);
            }
        }

        let inserted = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, pitch_id, pitch_time_slot_id, booking_date, \
             start_time, end_time, duration_hours, final_price, voucher_id, note, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'pending') RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.user_id)
        .bind(data.pitch_id)
        .bind(data.pitch_time_slot_id)
        .bind(data.booking_date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.duration_hours)
        .bind(data.final_price)
        .bind(data.voucher_id)
        .bind(&data.note)
        .fetch_one(&mut *tx)
        .await;

        let booking = match inserted {
            Ok(booking) => booking,
            Err(sqlx::Error::Database(ref db_err)) if db_err.constraint() == Some(LIVE_SLOT_UNIQUE) => {
                return Ok(InsertOutcome::SlotTaken);
            }
            Err(sqlx::Error::Database(ref db_err))
                if db_err.constraint() == Some(USER_VOUCHER_UNIQUE) =>
            {
                return Ok(InsertOutcome::VoucherAlreadyUsed);
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to insert booking",
                    e,
                ));
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(InsertOutcome::Created(booking))
    }

    /// Move a booking from `from` to `to`. Returns `None` when the booking
    /// was no longer in `from`.
    pub async fn transition(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $3, rejection_reason = COALESCE($4, rejection_reason), \
             updated_at = NOW() WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update booking", e))
    }

    /// List bookings newest first.
    pub async fn find_all(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BookingDetail>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM bookings b WHERE TRUE");
        push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let mut select = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        select.push(" WHERE TRUE");
        push_filters(&mut select, filter);
        select.push(" ORDER BY b.created_at DESC, b.id DESC LIMIT ");
        select.push_bind(page.limit() as i64);
        select.push(" OFFSET ");
        select.push_bind(page.offset() as i64);

        let bookings = select
            .build_query_as::<BookingDetail>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &BookingFilter) {
    if let Some(user_id) = filter.user_id {
        qb.push(" AND b.user_id = ");
        qb.push_bind(user_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND b.status = ");
        qb.push_bind(status);
    }
}
