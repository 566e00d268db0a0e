//! Request context carrying the authenticated user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchhub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and *when*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid, role: UserRole, username: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            username: username.into(),
            request_time: Utc::now(),
        }
    }

    /// Override the request time.
    pub fn at(mut self, request_time: DateTime<Utc>) -> Self {
        self.request_time = request_time;
        self
    }

    /// Calendar date the request is evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.request_time.date_naive()
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
