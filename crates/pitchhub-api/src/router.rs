//! Route definitions for the PitchHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(pitch_routes())
        .merge(comment_routes())
        .merge(booking_routes())
        .merge(favorite_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, activation, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/activate/{token}", get(handlers::auth::activate))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Public catalogue plus reviews and favourite toggling
fn pitch_routes() -> Router<AppState> {
    Router::new()
        .route("/pitch-types", get(handlers::pitch::list_types))
        .route("/pitches", get(handlers::pitch::search))
        .route("/pitches/{id}", get(handlers::pitch::get_pitch))
        .route("/pitches/{id}/slots", get(handlers::pitch::slot_board))
        .route(
            "/pitches/{id}/reviews",
            get(handlers::pitch::list_reviews).post(handlers::pitch::create_review),
        )
        .route(
            "/pitches/{id}/favorite",
            post(handlers::pitch::toggle_favorite),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/reviews/{id}/comments",
        get(handlers::comment::list_comments).post(handlers::comment::create_comment),
    )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
}

fn favorite_routes() -> Router<AppState> {
    Router::new().route("/favorites", get(handlers::favorite::list_favorites))
}

/// Admin endpoints (capability checks in the services)
fn admin_routes() -> Router<AppState> {
    use handlers::admin::{bookings, catalog, vouchers};

    Router::new()
        .route("/admin/bookings", get(bookings::list_bookings))
        .route(
            "/admin/bookings/{id}/approve",
            post(bookings::approve_booking),
        )
        .route("/admin/bookings/{id}/reject", post(bookings::reject_booking))
        .route("/admin/pitch-types", post(catalog::create_pitch_type))
        .route("/admin/pitches", post(catalog::create_pitch))
        .route("/admin/pitches/{id}", put(catalog::update_pitch))
        .route("/admin/pitches/{id}/slots", post(catalog::attach_slot))
        .route(
            "/admin/time-slots",
            get(catalog::list_time_slots).post(catalog::create_time_slot),
        )
        .route(
            "/admin/vouchers",
            get(vouchers::list_vouchers).post(vouchers::create_voucher),
        )
}
