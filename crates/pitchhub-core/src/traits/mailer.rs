//! Outbound e-mail transport trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl OutboundMessage {
    /// Build a message.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Trait for mail transports.
///
/// Implementations deliver a single message and report failure through
/// [`AppError`](crate::AppError). Callers decide whether a failure matters;
/// booking notifications only log it.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message.
    async fn send(&self, message: &OutboundMessage) -> AppResult<()>;
}
