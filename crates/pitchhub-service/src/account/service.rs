//! Account lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use pitchhub_auth::activation::ActivationTokenGenerator;
use pitchhub_auth::jwt::{IssuedToken, JwtEncoder};
use pitchhub_auth::password::{PasswordHasher, PasswordValidator};
use pitchhub_core::error::AppError;
use pitchhub_database::repositories::UserRepository;
use pitchhub_entity::user::{CreateUser, User, UserRole};

use crate::notification::BookingNotifier;

/// Self-service sign-up data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Handles account creation, activation and credential checks.
#[derive(Debug, Clone)]
pub struct AccountService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    password_validator: Arc<PasswordValidator>,
    tokens: Arc<ActivationTokenGenerator>,
    jwt: Arc<JwtEncoder>,
    notifier: Arc<BookingNotifier>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        password_validator: Arc<PasswordValidator>,
        tokens: Arc<ActivationTokenGenerator>,
        jwt: Arc<JwtEncoder>,
        notifier: Arc<BookingNotifier>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_validator,
            tokens,
            jwt,
            notifier,
        }
    }

    /// Registers an inactive user and e-mails the activation link.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_lowercase();
        if username.is_empty() {
            return Err(AppError::field("username", "Username cannot be empty"));
        }

        self.password_validator
            .validate(&req.password, &[&username, &email, &req.full_name])?;
        let password_hash = self.hasher.hash_password(&req.password)?;
        let activation = self.tokens.generate(Utc::now());

        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email,
                full_name: req.full_name.trim().to_string(),
                phone_number: req.phone_number.trim().to_string(),
                password_hash,
                role: UserRole::User,
                is_active: false,
                activation_token: Some(activation.token.clone()),
                activation_expiry: Some(activation.expires_at),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        self.notifier
            .activation(&user, &activation.token, self.tokens.ttl_hours())
            .await;
        Ok(user)
    }

    /// Activates the account holding `token`.
    pub async fn activate(&self, token: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_activation_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Activation link is invalid"))?;

        if user.activation_expired(Utc::now()) {
            warn!(user_id = %user.id, "Expired activation token used");
            return Err(AppError::validation(
                "Activation link has expired. Please register again.",
            ));
        }

        let user = self.user_repo.activate(user.id).await?;
        info!(user_id = %user.id, "Account activated");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, req: LoginRequest) -> Result<(User, IssuedToken), AppError> {
        let invalid = || AppError::authentication("Invalid username or password");

        let user = self
            .user_repo
            .find_by_username(req.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            warn!(username = %user.username, "Failed login attempt");
            return Err(invalid());
        }
        if !user.is_active {
            return Err(AppError::authentication(
                "Account is not activated. Please check your e-mail.",
            ));
        }

        let token = self
            .jwt
            .generate_access_token(user.id, user.role, &user.username)?;
        info!(user_id = %user.id, "User logged in");
        Ok((user, token))
    }

    /// The authenticated user's profile.
    pub async fn me(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates an active administrator. Used by the admin CLI.
    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        self.password_validator
            .validate(password, &[username, email])?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.trim().to_string(),
                email: email.trim().to_lowercase(),
                full_name: String::new(),
                phone_number: String::new(),
                password_hash,
                role: UserRole::Admin,
                is_active: true,
                activation_token: None,
                activation_expiry: None,
            })
            .await?;
        info!(user_id = %user.id, username = %user.username, "Administrator created");
        Ok(user)
    }
}
