//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use pitchhub_auth::jwt::JwtDecoder;
use pitchhub_core::config::AppConfig;
use pitchhub_service::account::AccountService;
use pitchhub_service::booking::BookingService;
use pitchhub_service::favorite::FavoriteService;
use pitchhub_service::pitch::CatalogService;
use pitchhub_service::review::{CommentService, ReviewService};
use pitchhub_service::voucher::VoucherService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Booking orchestrator
    pub booking_service: Arc<BookingService>,
    /// Pitch catalogue
    pub catalog_service: Arc<CatalogService>,
    /// Reviews
    pub review_service: Arc<ReviewService>,
    /// Review comment threads
    pub comment_service: Arc<CommentService>,
    /// Favourites
    pub favorite_service: Arc<FavoriteService>,
    /// Registration, activation, login
    pub account_service: Arc<AccountService>,
    /// Voucher administration
    pub voucher_service: Arc<VoucherService>,
}
