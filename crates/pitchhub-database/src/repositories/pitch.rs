//! Pitch and pitch type repository implementation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use pitchhub_core::error::{AppError, ErrorKind};
use pitchhub_core::result::AppResult;
use pitchhub_core::types::pagination::{PageRequest, PageResponse};
use pitchhub_entity::pitch::{CreatePitch, CreatePitchType, Pitch, PitchType, UpdatePitch};

/// Result ordering for pitch searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PitchOrder {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl PitchOrder {
    fn sql(&self) -> &'static str {
        match self {
            Self::Newest => " ORDER BY p.created_at DESC, p.id",
            Self::PriceAsc => " ORDER BY p.base_price_per_hour ASC, p.id",
            Self::PriceDesc => " ORDER BY p.base_price_per_hour DESC, p.id",
            Self::NameAsc => " ORDER BY p.name ASC, p.id",
            Self::NameDesc => " ORDER BY p.name DESC, p.id",
        }
    }
}

/// Filters applied by [`PitchRepository::search`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct PitchSearchFilter {
    /// Case-insensitive substring of name or address.
    pub keyword: Option<String>,
    pub pitch_type_id: Option<Uuid>,
    /// Inclusive lower bound on the hourly rate.
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the hourly rate.
    pub max_price: Option<Decimal>,
    /// Keep only available pitches with at least one free available slot on this date.
    pub free_on: Option<NaiveDate>,
    pub order: PitchOrder,
}

/// Repository for the pitch catalogue.
#[derive(Debug, Clone)]
pub struct PitchRepository {
    pool: PgPool,
}

impl PitchRepository {
    /// Create a new pitch repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a pitch by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Pitch>> {
        sqlx::query_as::<_, Pitch>("SELECT * FROM pitches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pitch", e))
    }

    /// Search the catalogue.
    pub async fn search(
        &self,
        filter: &PitchSearchFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Pitch>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM pitches p WHERE TRUE");
        push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count pitches", e))?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT p.* FROM pitches p WHERE TRUE");
        push_filters(&mut select, filter);
        select.push(filter.order.sql());
        select.push(" LIMIT ");
        select.push_bind(page.limit() as i64);
        select.push(" OFFSET ");
        select.push_bind(page.offset() as i64);

        let pitches = select
            .build_query_as::<Pitch>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search pitches", e))?;

        Ok(PageResponse::new(
            pitches,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a pitch.
    pub async fn create(&self, data: &CreatePitch) -> AppResult<Pitch> {
        sqlx::query_as::<_, Pitch>(
            "INSERT INTO pitches (id, name, address, description, pitch_type_id, \
             base_price_per_hour, images, is_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.description)
        .bind(data.pitch_type_id)
        .bind(data.base_price_per_hour)
        .bind(&data.images)
        .bind(data.is_available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::field("pitch_type_id", "Unknown pitch type")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create pitch", e),
        })
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdatePitch) -> AppResult<Option<Pitch>> {
        sqlx::query_as::<_, Pitch>(
            "UPDATE pitches SET name = COALESCE($2, name), address = COALESCE($3, address), \
             description = COALESCE($4, description), \
             pitch_type_id = COALESCE($5, pitch_type_id), \
             base_price_per_hour = COALESCE($6, base_price_per_hour), \
             images = COALESCE($7, images), is_available = COALESCE($8, is_available), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.description)
        .bind(data.pitch_type_id)
        .bind(data.base_price_per_hour)
        .bind(&data.images)
        .bind(data.is_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::field("pitch_type_id", "Unknown pitch type")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update pitch", e),
        })
    }

    /// List pitch types by name.
    pub async fn find_all_types(&self) -> AppResult<Vec<PitchType>> {
        sqlx::query_as::<_, PitchType>("SELECT * FROM pitch_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pitch types", e))
    }

    /// Create a pitch type.
    pub async fn create_type(&self, data: &CreatePitchType) -> AppResult<PitchType> {
        sqlx::query_as::<_, PitchType>(
            "INSERT INTO pitch_types (id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("pitch_types_name_key") =>
            {
                AppError::conflict(format!("Pitch type '{}' already exists", data.name))
                    .on_field("name")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create pitch type", e),
        })
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PitchSearchFilter) {
    if let Some(keyword) = filter.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        let pattern = format!("%{}%", escape_like(keyword));
        qb.push(" AND (p.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.address ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(type_id) = filter.pitch_type_id {
        qb.push(" AND p.pitch_type_id = ");
        qb.push_bind(type_id);
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND p.base_price_per_hour >= ");
        qb.push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND p.base_price_per_hour <= ");
        qb.push_bind(max);
    }
    if let Some(date) = filter.free_on {
        qb.push(
            " AND p.is_available AND EXISTS (SELECT 1 FROM pitch_time_slots pts \
             WHERE pts.pitch_id = p.id AND pts.is_available AND NOT EXISTS \
             (SELECT 1 FROM bookings b WHERE b.pitch_time_slot_id = pts.id \
             AND b.status IN ('pending', 'confirmed') AND b.booking_date = ",
        );
        qb.push_bind(date);
        qb.push("))");
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn test_filters_render_expected_sql() {
        let filter = PitchSearchFilter {
            keyword: Some("  ".into()),
            pitch_type_id: Some(Uuid::nil()),
            min_price: Some(Decimal::from(100_000)),
            max_price: None,
            free_on: None,
            order: PitchOrder::PriceDesc,
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM pitches p WHERE TRUE");
        push_filters(&mut qb, &filter);
        qb.push(filter.order.sql());
        assert_eq!(
            qb.sql(),
            "SELECT p.* FROM pitches p WHERE TRUE AND p.pitch_type_id = $1 \
             AND p.base_price_per_hour >= $2 ORDER BY p.base_price_per_hour DESC, p.id"
        );
    }

    #[test]
    fn test_keyword_and_free_date_render_expected_sql() {
        let filter = PitchSearchFilter {
            keyword: Some(" phu ".into()),
            free_on: NaiveDate::from_ymd_opt(2030, 6, 1),
            order: PitchOrder::NameDesc,
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT p.* FROM pitches p WHERE TRUE");
        push_filters(&mut qb, &filter);
        qb.push(filter.order.sql());
        assert_eq!(
            qb.sql(),
            "SELECT p.* FROM pitches p WHERE TRUE AND (p.name ILIKE $1 OR p.address ILIKE $2) \
             AND p.is_available AND EXISTS (SELECT 1 FROM pitch_time_slots pts \
             WHERE pts.pitch_id = p.id AND pts.is_available AND NOT EXISTS \
             (SELECT 1 FROM bookings b WHERE b.pitch_time_slot_id = pts.id \
             AND b.status IN ('pending', 'confirmed') AND b.booking_date = $3)) \
             ORDER BY p.name DESC, p.id"
        );
    }
}
