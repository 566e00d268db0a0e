//! Account activation tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use pitchhub_core::config::AuthConfig;

/// Number of random bytes behind each token.
const TOKEN_BYTES: usize = 24;

/// A newly minted activation token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationToken {
    /// URL-safe token text.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Mints URL-safe activation tokens.
#[derive(Debug, Clone)]
pub struct ActivationTokenGenerator {
    ttl: Duration,
}

impl ActivationTokenGenerator {
    /// Creates a generator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            ttl: i64::try_from(config.activation_token_ttl_hours)
                .ok()
                .and_then(Duration::try_hours)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Token lifetime in whole hours.
    pub fn ttl_hours(&self) -> i64 {
        self.ttl.num_hours()
    }

    /// Generate a token expiring `ttl` after `now`.
    pub fn generate(&self, now: DateTime<Utc>) -> ActivationToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        ActivationToken {
            token: URL_SAFE_NO_PAD.encode(bytes),
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_url_safe_and_unique() {
        let generator = ActivationTokenGenerator::new(&AuthConfig::default());
        let now = Utc::now();
        let a = generator.generate(now);
        let b = generator.generate(now);

        assert_eq!(a.token.len(), 32);
        assert!(
            a.token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(a.token, b.token);
        assert_eq!(a.expires_at - now, Duration::hours(24));
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let config = AuthConfig {
            activation_token_ttl_hours: u64::MAX,
            ..AuthConfig::default()
        };
        let token = ActivationTokenGenerator::new(&config).generate(Utc::now());
        assert_eq!(token.expires_at, DateTime::<Utc>::MAX_UTC);
    }
}
