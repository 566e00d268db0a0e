//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{Duration, NaiveDate, Utc};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use pitchhub_auth::PasswordHasher;
use pitchhub_core::config::AppConfig;
use pitchhub_database::repositories::UserRepository;
use pitchhub_database::{BookingStore, DatabasePool, PgBookingStore};
use pitchhub_entity::user::{CreateUser, UserRole};
use pitchhub_service::MemoryMailer;

pub const PASSWORD: &str = "Correct-Horse-Battery-42";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Captured outbound mail
    pub mailer: MemoryMailer,
}

/// Status and parsed JSON body of a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application over a freshly cleaned database
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
        config.database.min_connections = 0;
        config.auth.jwt_secret = "integration-secret-integration-secret".to_string();

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        pitchhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let mailer = MemoryMailer::new();
        let store: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(db_pool.clone()));
        let state =
            pitchhub_api::build_state(config, db_pool.clone(), store, Arc::new(mailer.clone()));

        Self {
            router: pitchhub_api::build_app(state),
            db_pool,
            mailer,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "favorites",
            "comments",
            "reviews",
            "bookings",
            "vouchers",
            "pitch_time_slots",
            "time_slots",
            "pitches",
            "pitch_types",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            sqlx::query(&query)
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Create an active user directly in the database and return their ID
    pub async fn create_user(&self, username: &str, role: UserRole) -> Uuid {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        UserRepository::new(self.db_pool.clone())
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                full_name: username.to_string(),
                phone_number: String::new(),
                password_hash,
                role,
                is_active: true,
                activation_token: None,
                activation_expiry: None,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "Login failed: {}", response.body);

        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create a user of `role` and log them in.
    pub async fn user_token(&self, username: &str, role: UserRole) -> String {
        self.create_user(username, role).await;
        self.login(username).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Seed a pitch type, a pitch at 120,000/h and one 17:00-18:30 slot.
    /// Returns `(pitch_id, pitch_time_slot_id)`.
    pub async fn seed_pitch(&self, admin_token: &str) -> (String, String) {
        let (type_id, slot_id) = self.seed_type_and_slot(admin_token).await;
        self.add_pitch(admin_token, &type_id, &slot_id, "Phu Tho", "1 Lu Gia", "120000")
            .await
    }

    /// Seed the "5-a-side" pitch type and the 17:00-18:30 "Evening" slot.
    /// Returns `(pitch_type_id, time_slot_id)`.
    pub async fn seed_type_and_slot(&self, admin_token: &str) -> (String, String) {
        let pitch_type = self
            .request(
                "POST",
                "/api/admin/pitch-types",
                Some(json!({ "name": "5-a-side" })),
                Some(admin_token),
            )
            .await;
        assert_eq!(pitch_type.status, StatusCode::CREATED, "{}", pitch_type.body);

        let slot = self
            .request(
                "POST",
                "/api/admin/time-slots",
                Some(json!({ "name": "Evening", "start_time": "17:00:00", "end_time": "18:30:00" })),
                Some(admin_token),
            )
            .await;
        assert_eq!(slot.status, StatusCode::CREATED, "{}", slot.body);

        (
            pitch_type.data()["id"].as_str().unwrap().to_string(),
            slot.data()["id"].as_str().unwrap().to_string(),
        )
    }

    /// Create a pitch and attach `time_slot_id` to it.
    /// Returns `(pitch_id, pitch_time_slot_id)`.
    pub async fn add_pitch(
        &self,
        admin_token: &str,
        pitch_type_id: &str,
        time_slot_id: &str,
        name: &str,
        address: &str,
        price_per_hour: &str,
    ) -> (String, String) {
        let pitch = self
            .request(
                "POST",
                "/api/admin/pitches",
                Some(json!({
                    "name": name,
                    "address": address,
                    "pitch_type_id": pitch_type_id,
                    "base_price_per_hour": price_per_hour,
                })),
                Some(admin_token),
            )
            .await;
        assert_eq!(pitch.status, StatusCode::CREATED, "{}", pitch.body);
        let pitch_id = pitch.data()["id"].as_str().unwrap().to_string();

        let attached = self
            .request(
                "POST",
                &format!("/api/admin/pitches/{pitch_id}/slots"),
                Some(json!({ "time_slot_id": time_slot_id })),
                Some(admin_token),
            )
            .await;
        assert_eq!(attached.status, StatusCode::CREATED, "{}", attached.body);

        (pitch_id, attached.data()["id"].as_str().unwrap().to_string())
    }
}

/// A date `days` from today (UTC).
pub fn days_ahead(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}
