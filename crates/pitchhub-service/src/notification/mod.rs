//! Booking and account e-mail notifications.

pub mod mailer;
pub mod notifier;
pub mod templates;

pub use mailer::{LogMailer, MemoryMailer};
pub use notifier::BookingNotifier;
pub use templates::{BookingEmail, NotificationKind, format_price, render_activation};
