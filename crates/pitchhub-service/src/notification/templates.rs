//! Plain-text e-mail templates.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

use pitchhub_entity::booking::BookingDetail;

/// Every kind of e-mail the system sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    BookingCreated,
    BookingApproved,
    BookingRejected,
    BookingCancelled,
    AccountActivation,
}

impl NotificationKind {
    /// Return the kind as a snake_case string for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingCreated => "booking_created",
            Self::BookingApproved => "booking_approved",
            Self::BookingRejected => "booking_rejected",
            Self::BookingCancelled => "booking_cancelled",
            Self::AccountActivation => "account_activation",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a price with thousands separators and no decimals: `1,000,000 VND`.
pub fn format_price(price: Decimal, currency_suffix: &str) -> String {
    let whole = price.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = whole.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if whole.is_sign_negative() && !whole.is_zero() {
        "-"
    } else {
        ""
    };
    if currency_suffix.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped} {currency_suffix}")
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Values interpolated into booking e-mails.
#[derive(Debug, Clone)]
pub struct BookingEmail {
    pub booking_ref: String,
    pub user_name: String,
    pub pitch_name: String,
    pub booking_date: String,
    pub slot_name: String,
    pub start_time: String,
    pub end_time: String,
    pub final_price: String,
}

impl BookingEmail {
    /// Collect the template values from a booking.
    pub fn from_detail(detail: &BookingDetail, currency_suffix: &str) -> Self {
        let user_name = if detail.user_full_name.trim().is_empty() {
            detail.username.clone()
        } else {
            detail.user_full_name.clone()
        };
        Self {
            booking_ref: detail.booking.id.to_string(),
            user_name,
            pitch_name: detail.pitch_name.clone(),
            booking_date: format_date(detail.booking.booking_date),
            slot_name: detail.slot_name.clone(),
            start_time: format_time(detail.booking.start_time),
            end_time: format_time(detail.booking.end_time),
            final_price: format_price(detail.booking.final_price, currency_suffix),
        }
    }

    fn summary(&self, with_price: bool) -> String {
        let mut lines = format!(
            "Booking details:\n\
             - Pitch: {}\n\
             - Date: {}\n\
             - Time slot: {} ({} - {})\n",
            self.pitch_name, self.booking_date, self.slot_name, self.start_time, self.end_time
        );
        if with_price {
            lines.push_str(&format!("- Total: {}\n", self.final_price));
        }
        lines
    }

    /// Render subject and body. `reason` is only used for rejections.
    pub fn render(&self, kind: NotificationKind, reason: Option<&str>) -> (String, String) {
        let greeting = format!("Hello {},\n\n", self.user_name);
        let signature = "\nBest regards,\nPitchHub booking team\n";

        let (subject, intro, details, outro) = match kind {
            NotificationKind::BookingCreated => (
                format!("Booking received #{}", self.booking_ref),
                "Your booking has been received.\n\n".to_string(),
                self.summary(true),
                "\nStatus: Pending\n\nPlease wait for an administrator to confirm it.\n"
                    .to_string(),
            ),
            NotificationKind::BookingApproved => (
                format!("Booking approved #{}", self.booking_ref),
                "Your booking has been approved!\n\n".to_string(),
                self.summary(true),
                "\nPlease arrive on time and pay at the venue.\n".to_string(),
            ),
            NotificationKind::BookingRejected => (
                format!("Booking rejected #{}", self.booking_ref),
                "Unfortunately your booking request has been rejected.\n\n".to_string(),
                self.summary(false),
                format!(
                    "\nReason: {}\n\nPlease choose another time slot or contact us for help.\n",
                    reason.unwrap_or_default()
                ),
            ),
            NotificationKind::BookingCancelled => (
                format!("Booking cancelled #{}", self.booking_ref),
                "Your booking has been cancelled.\n\n".to_string(),
                self.summary(false),
                "\nYou are welcome to book again at any time.\n".to_string(),
            ),
            NotificationKind::AccountActivation => (
                "Activate your account".to_string(),
                String::new(),
                String::new(),
                String::new(),
            ),
        };

        (
            subject,
            format!("{greeting}{intro}{details}{outro}{signature}"),
        )
    }
}

/// Render the account activation e-mail.
pub fn render_activation(user_name: &str, link: &str, ttl_hours: i64) -> (String, String) {
    (
        "Activate your account".to_string(),
        format!(
            "Hello {user_name},\n\n\
             Please open the link below to activate your account:\n\
             {link}\n\n\
             This link expires in {ttl_hours} hours.\n\n\
             If you did not create this account, you can ignore this e-mail.\n\n\
             Best regards,\nPitchHub support team\n"
        ),
    )
}
