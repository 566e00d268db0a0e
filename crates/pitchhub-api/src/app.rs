//! Application builder: wires repositories, services and the router.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use pitchhub_auth::{
    ActivationTokenGenerator, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator,
    RbacEnforcer,
};
use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_core::traits::Mailer;
use pitchhub_database::repositories::{
    BookingRepository, CommentRepository, FavoriteRepository, PitchRepository, ReviewRepository,
    SlotRepository, UserRepository, VoucherRepository,
};
use pitchhub_database::{BookingStore, PgBookingStore};
use pitchhub_service::{
    AccountService, BookingNotifier, BookingService, CatalogService, CommentService,
    FavoriteService, LogMailer, ReviewService, VoucherService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wires repositories and services into an [`AppState`].
///
/// The booking store and mailer are injected so tests can swap in
/// in-memory implementations.
pub fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    store: Arc<dyn BookingStore>,
    mailer: Arc<dyn Mailer>,
) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let pitch_repo = Arc::new(PitchRepository::new(db_pool.clone()));
    let slot_repo = Arc::new(SlotRepository::new(db_pool.clone()));
    let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
    let review_repo = Arc::new(ReviewRepository::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));
    let favorite_repo = Arc::new(FavoriteRepository::new(db_pool.clone()));
    let voucher_repo = Arc::new(VoucherRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let rbac = Arc::new(RbacEnforcer::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let activation_tokens = Arc::new(ActivationTokenGenerator::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let notifier = Arc::new(BookingNotifier::new(mailer, config.mail.clone()));

    let booking_service = Arc::new(BookingService::new(
        store,
        Arc::clone(&notifier),
        Arc::clone(&rbac),
        config.booking.clone(),
    ));
    let catalog_service = Arc::new(CatalogService::new(
        Arc::clone(&pitch_repo),
        slot_repo,
        Arc::clone(&rbac),
        config.booking.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(
        comment_repo,
        Arc::clone(&review_repo),
        Arc::clone(&rbac),
    ));
    let review_service = Arc::new(ReviewService::new(
        review_repo,
        Arc::clone(&pitch_repo),
        booking_repo,
        Arc::clone(&rbac),
    ));
    let favorite_service = Arc::new(FavoriteService::new(
        favorite_repo,
        pitch_repo,
        Arc::clone(&rbac),
    ));
    let account_service = Arc::new(AccountService::new(
        user_repo,
        hasher,
        password_validator,
        activation_tokens,
        jwt_encoder,
        notifier,
    ));
    let voucher_service = Arc::new(VoucherService::new(voucher_repo, rbac));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        booking_service,
        catalog_service,
        review_service,
        comment_service,
        favorite_service,
        account_service,
        voucher_service,
    }
}

/// Runs the PitchHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting PitchHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let store: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(db_pool.clone()));
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer::new(config.mail.from_address.clone()));

    let app = build_app(build_state(config, db_pool, store, mailer));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("PitchHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("PitchHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
