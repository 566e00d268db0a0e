//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings used when rendering and sending notification e-mails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender address placed on every outgoing message.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Public base URL used to build activation links.
    #[serde(default = "default_base_url")]
    pub public_base_url: String,
    /// Suffix appended to formatted prices.
    #[serde(default = "default_currency")]
    pub currency_suffix: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: default_from(),
            public_base_url: default_base_url(),
            currency_suffix: default_currency(),
        }
    }
}

fn default_from() -> String {
    "noreply@pitchhub.local".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_currency() -> String {
    "VND".to_string()
}
