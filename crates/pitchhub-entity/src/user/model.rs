//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique e-mail address; notifications go here.
    pub email: String,
    /// Full name shown in greetings.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Whether the account has been activated.
    pub is_active: bool,
    /// Pending activation token, cleared on activation.
    #[serde(skip_serializing)]
    pub activation_token: Option<String>,
    /// When the activation token stops being accepted.
    #[serde(skip_serializing)]
    pub activation_expiry: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Name used in e-mail greetings.
    pub fn greeting_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }

    /// Whether the stored activation token has expired at `now`.
    pub fn activation_expired(&self, now: DateTime<Utc>) -> bool {
        self.activation_expiry.is_some_and(|expiry| now > expiry)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Whether the account starts active.
    pub is_active: bool,
    /// Activation token for inactive accounts.
    pub activation_token: Option<String>,
    /// Activation token expiry.
    pub activation_expiry: Option<DateTime<Utc>>,
}
