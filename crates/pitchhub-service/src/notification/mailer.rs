//! Mail transports shipped with the service layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use pitchhub_core::error::AppError;
use pitchhub_core::result::AppResult;
use pitchhub_core::traits::mailer::{Mailer, OutboundMessage};

/// Writes every message to the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Creates a log mailer stamping messages with `from_address`.
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &OutboundMessage) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "Outbound e-mail"
        );
        Ok(())
    }
}

/// Collects messages in memory. Can be switched into a failing mode.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages delivered so far, oldest first.
    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &OutboundMessage) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Mail transport unavailable"));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_mailer_records_and_fails() {
        let mailer = MemoryMailer::new();
        let msg = OutboundMessage::new("a@b.c", "Hi", "Body");
        mailer.send(&msg).await.unwrap();

        mailer.set_failing(true);
        assert!(mailer.send(&msg).await.is_err());

        assert_eq!(mailer.sent().await, vec![msg]);
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer::new("noreply@pitchhub.local");
        let msg = OutboundMessage::new("a@b.c", "Hi", "Body");
        assert!(mailer.send(&msg).await.is_ok());
    }
}
