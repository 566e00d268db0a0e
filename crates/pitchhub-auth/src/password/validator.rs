//! Password policy enforcement for new passwords.

use pitchhub_core::config::AuthConfig;
use pitchhub_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password, reporting the first violation on field `password`.
    ///
    /// `user_inputs` (username, e-mail, ...) are penalised by the entropy check.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::field(
                "password",
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }

        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::field(
                "password",
                "Password cannot be entirely numeric",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::field(
                "password",
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }
}
