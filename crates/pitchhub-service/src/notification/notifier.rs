//! Sends booking lifecycle and activation e-mails.
//!
//! Delivery failures are logged and swallowed. A booking that was stored
//! stays stored whatever the mail transport does.

use std::sync::Arc;

use tracing::{debug, warn};

use pitchhub_core::config::MailConfig;
use pitchhub_core::traits::mailer::{Mailer, OutboundMessage};
use pitchhub_entity::booking::BookingDetail;
use pitchhub_entity::user::User;

use super::templates::{BookingEmail, NotificationKind, render_activation};

/// Renders notification templates and hands them to a [`Mailer`].
#[derive(Clone)]
pub struct BookingNotifier {
    mailer: Arc<dyn Mailer>,
    config: MailConfig,
}

impl std::fmt::Debug for BookingNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingNotifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BookingNotifier {
    /// Creates a notifier over the given transport.
    pub fn new(mailer: Arc<dyn Mailer>, config: MailConfig) -> Self {
        Self { mailer, config }
    }

    pub async fn booking_created(&self, detail: &BookingDetail) {
        self.notify_booking(NotificationKind::BookingCreated, detail, None)
            .await;
    }

    pub async fn booking_approved(&self, detail: &BookingDetail) {
        self.notify_booking(NotificationKind::BookingApproved, detail, None)
            .await;
    }

    pub async fn booking_rejected(&self, detail: &BookingDetail, reason: &str) {
        self.notify_booking(NotificationKind::BookingRejected, detail, Some(reason))
            .await;
    }

    pub async fn booking_cancelled(&self, detail: &BookingDetail) {
        self.notify_booking(NotificationKind::BookingCancelled, detail, None)
            .await;
    }

    /// Send the activation link for a freshly registered account.
    pub async fn activation(&self, user: &User, token: &str, ttl_hours: i64) {
        let link = self.activation_link(token);
        let (subject, body) = render_activation(user.greeting_name(), &link, ttl_hours);
        let message = OutboundMessage::new(&user.email, subject, body);
        self.deliver(NotificationKind::AccountActivation, &message)
            .await;
    }

    /// Absolute URL of the activation endpoint for `token`.
    pub fn activation_link(&self, token: &str) -> String {
        format!(
            "{}/api/auth/activate/{}",
            self.config.public_base_url.trim_end_matches('/'),
            token
        )
    }

    async fn notify_booking(
        &self,
        kind: NotificationKind,
        detail: &BookingDetail,
        reason: Option<&str>,
    ) {
        let email = BookingEmail::from_detail(detail, &self.config.currency_suffix);
        let (subject, body) = email.render(kind, reason);
        let message = OutboundMessage::new(&detail.user_email, subject, body);
        self.deliver(kind, &message).await;
    }

    async fn deliver(&self, kind: NotificationKind, message: &OutboundMessage) {
        match self.mailer.send(message).await {
            Ok(()) => debug!(kind = %kind, to = %message.to, "Notification sent"),
            Err(e) => warn!(
                kind = %kind,
                to = %message.to,
                error = %e,
                "Failed to send notification"
            ),
        }
    }
}
