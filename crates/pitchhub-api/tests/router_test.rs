//! Router tests over the in-memory booking store.
//!
//! Only routes backed by the booking store and the auth layer are
//! exercised here; the pool is lazy and never connects.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{Duration, NaiveTime, Utc};
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use pitchhub_api::{build_app, build_state};
use pitchhub_auth::JwtEncoder;
use pitchhub_core::config::AppConfig;
use pitchhub_database::{BookingStore, DatabasePool, MemoryBookingStore};
use pitchhub_entity::booking::BookingStatus;
use pitchhub_entity::pitch::Pitch;
use pitchhub_entity::slot::{PitchTimeSlot, TimeSlot};
use pitchhub_entity::user::{User, UserRole};
use pitchhub_service::MemoryMailer;

struct TestApp {
    app: Router,
    store: MemoryBookingStore,
    mailer: MemoryMailer,
    jwt: JwtEncoder,
    pitch: Pitch,
    slot: PitchTimeSlot,
}

fn user(username: &str, role: UserRole) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: String::new(),
        phone_number: String::new(),
        password_hash: String::new(),
        role,
        is_active: true,
        activation_token: None,
        activation_expiry: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

impl TestApp {
    async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.min_connections = 0;
        config.auth.jwt_secret = "router-test-secret-router-test-secret".to_string();

        let pool = DatabasePool::connect_lazy(&config.database)
            .unwrap()
            .into_pool();
        let store = MemoryBookingStore::new();
        let mailer = MemoryMailer::new();
        let jwt = JwtEncoder::new(&config.auth);

        let pitch = Pitch {
            id: Uuid::now_v7(),
            name: "Chao Lua".into(),
            address: "12 Truong Chinh".into(),
            description: None,
            pitch_type_id: Uuid::now_v7(),
            base_price_per_hour: "150000".parse().unwrap(),
            images: Vec::new(),
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.put_pitch(pitch.clone()).await;
        let time_slot = TimeSlot {
            id: Uuid::now_v7(),
            name: "Evening".into(),
            start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        };
        store.put_time_slot(time_slot.clone()).await;
        let slot = store.attach_slot(pitch.id, time_slot.id, true).await;

        let state = build_state(
            config,
            pool,
            Arc::new(store.clone()) as Arc<dyn BookingStore>,
            Arc::new(mailer.clone()),
        );

        Self {
            app: build_app(state),
            store,
            mailer,
            jwt,
            pitch,
            slot,
        }
    }

    async fn login_as(&self, username: &str, role: UserRole) -> (User, String) {
        let user = user(username, role);
        self.store.put_user(user.clone()).await;
        let token = self
            .jwt
            .generate_access_token(user.id, user.role, &user.username)
            .unwrap();
        (user, token.access_token)
    }

    async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn booking_body(&self, days_ahead: i64) -> Value {
        let date = Utc::now().date_naive() + Duration::days(days_ahead);
        json!({
            "pitch_id": self.pitch.id,
            "time_slot_id": self.slot.id,
            "booking_date": date,
        })
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_booking_requires_token() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send("POST", "/api/bookings", None, Some(app.booking_body(2)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send("GET", "/api/bookings", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_booking() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;

    let (status, body) = app
        .send("POST", "/api/bookings", Some(&token), Some(app.booking_body(2)))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let booking = &body["data"]["booking"];
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["duration_hours"], "1.50");
    assert_eq!(booking["final_price"], "225000.00");
    assert_eq!(body["data"]["warnings"], json!([]));
    assert_eq!(app.mailer.sent().await.len(), 1);
}

#[tokio::test]
async fn test_past_date_is_field_error() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;

    let (status, body) = app
        .send("POST", "/api/bookings", Some(&token), Some(app.booking_body(-1)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["field"], "booking_date");
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/bookings",
            Some(&token),
            Some(json!({ "pitch_id": "nope" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["field"], "pitch_id");
}

#[tokio::test]
async fn test_unparseable_date_is_keyed_by_field() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;
    let mut request = app.booking_body(2);
    request["booking_date"] = json!("next friday");

    let (status, body) = app
        .send("POST", "/api/bookings", Some(&token), Some(request))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["field"], "booking_date");
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_guest_cannot_book() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("visitor", UserRole::Guest).await;

    let (status, body) = app
        .send("POST", "/api/bookings", Some(&token), Some(app.booking_body(2)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_cannot_book() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("admin", UserRole::Admin).await;

    let (status, body) = app
        .send("POST", "/api/bookings", Some(&token), Some(app.booking_body(2)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_admin_approves_once() {
    let app = TestApp::new().await;
    let (_, user_token) = app.login_as("minh", UserRole::User).await;
    let (_, admin_token) = app.login_as("admin", UserRole::Admin).await;

    let (_, created) = app
        .send("POST", "/api/bookings", Some(&user_token), Some(app.booking_body(3)))
        .await;
    let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();
    let approve = format!("/api/admin/bookings/{id}/approve");

    let (status, body) = app.send("POST", &approve, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, body) = app.send("POST", &approve, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn test_user_cannot_approve() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;

    let (_, created) = app
        .send("POST", "/api/bookings", Some(&token), Some(app.booking_body(3)))
        .await;
    let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send("POST", &format!("/api/admin/bookings/{id}/approve"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reject_without_body_uses_default_reason() {
    let app = TestApp::new().await;
    let (_, user_token) = app.login_as("minh", UserRole::User).await;
    let (_, admin_token) = app.login_as("admin", UserRole::Admin).await;

    let (_, created) = app
        .send("POST", "/api/bookings", Some(&user_token), Some(app.booking_body(3)))
        .await;
    let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send("POST", &format!("/api/admin/bookings/{id}/reject"), Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "rejected");
    assert!(!body["data"]["rejection_reason"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_list_filters_by_status() {
    let app = TestApp::new().await;
    let (_, user_token) = app.login_as("minh", UserRole::User).await;
    let (_, admin_token) = app.login_as("admin", UserRole::Admin).await;

    app.send("POST", "/api/bookings", Some(&user_token), Some(app.booking_body(3)))
        .await;

    let (status, body) = app
        .send("GET", "/api/admin/bookings?status=pending", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);

    let (status, body) = app
        .send("GET", "/api/admin/bookings?status=confirmed", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 0);

    let (status, body) = app
        .send("GET", "/api/admin/bookings?status=bogus", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "status");
}

#[tokio::test]
async fn test_slot_board_marks_taken_slot() {
    let app = TestApp::new().await;
    let (_, token) = app.login_as("minh", UserRole::User).await;
    let body = app.booking_body(4);
    let date = body["booking_date"].as_str().unwrap().to_string();

    app.send("POST", "/api/bookings", Some(&token), Some(body)).await;

    let uri = format!("/api/pitches/{}/slots?date={date}", app.pitch.id);
    let (status, board) = app.send("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["data"][0]["taken"], true);
    assert_eq!(board["data"][0]["available"], false);
}

#[tokio::test]
async fn test_other_users_booking_is_hidden() {
    let app = TestApp::new().await;
    let (_, owner) = app.login_as("minh", UserRole::User).await;
    let (_, stranger) = app.login_as("lan", UserRole::User).await;

    let (_, created) = app
        .send("POST", "/api/bookings", Some(&owner), Some(app.booking_body(2)))
        .await;
    let id = created["data"]["booking"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send("GET", &format!("/api/bookings/{id}"), Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send("POST", &format!("/api/bookings/{id}/cancel"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], BookingStatus::Cancelled.to_string());
}
