//! Parsing of pitch search query parameters.
//!
//! Unrecognised `price_range` or `sort` values are ignored rather than
//! rejected, so a stale link still returns results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchhub_database::repositories::{PitchOrder, PitchSearchFilter};

/// Preset hourly-rate bands offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// 0 to 100,000.
    UpTo100k,
    /// 100,000 to 200,000.
    From100kTo200k,
    /// 200,000 to 300,000.
    From200kTo300k,
    /// 300,000 and above.
    Above300k,
}

impl PriceRange {
    /// Parse a preset key. Returns `None` for anything unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0-100000" => Some(Self::UpTo100k),
            "100000-200000" => Some(Self::From100kTo200k),
            "200000-300000" => Some(Self::From200kTo300k),
            "300000" => Some(Self::Above300k),
            _ => None,
        }
    }

    /// Inclusive bounds; the upper bound is open for the top band.
    pub fn bounds(&self) -> (Decimal, Option<Decimal>) {
        let k = |n: i64| Decimal::from(n * 1000);
        match self {
            Self::UpTo100k => (Decimal::ZERO, Some(k(100))),
            Self::From100kTo200k => (k(100), Some(k(200))),
            Self::From200kTo300k => (k(200), Some(k(300))),
            Self::Above300k => (k(300), None),
        }
    }
}

/// Sort key accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitchSort {
    #[default]
    Newest,
    Price,
    PriceDesc,
    Name,
    NameDesc,
}

impl PitchSort {
    /// `price`, `-price`, `name`, `-name`; anything else sorts newest first.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price" => Self::Price,
            "-price" => Self::PriceDesc,
            "name" => Self::Name,
            "-name" => Self::NameDesc,
            _ => Self::Newest,
        }
    }

    pub fn order(&self) -> PitchOrder {
        match self {
            Self::Newest => PitchOrder::Newest,
            Self::Price => PitchOrder::PriceAsc,
            Self::PriceDesc => PitchOrder::PriceDesc,
            Self::Name => PitchOrder::NameAsc,
            Self::NameDesc => PitchOrder::NameDesc,
        }
    }
}

/// Raw search parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PitchSearchQuery {
    pub q: Option<String>,
    pub pitch_type: Option<Uuid>,
    pub price_range: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub sort: Option<String>,
    pub page: Option<u64>,
}

impl PitchSearchQuery {
    /// Translate into a repository filter.
    pub fn to_filter(&self) -> PitchSearchFilter {
        let (min_price, max_price) = self
            .price_range
            .as_deref()
            .and_then(PriceRange::parse)
            .map(|range| {
                let (min, max) = range.bounds();
                (Some(min), max)
            })
            .unwrap_or((None, None));

        PitchSearchFilter {
            keyword: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            pitch_type_id: self.pitch_type,
            min_price,
            max_price,
            free_on: self.booking_date,
            order: self
                .sort
                .as_deref()
                .map(PitchSort::parse)
                .unwrap_or_default()
                .order(),
        }
    }
}
