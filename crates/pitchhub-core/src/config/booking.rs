//! Booking rule configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the booking orchestrator and the pitch catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// How many days ahead of today a pitch may be booked.
    #[serde(default = "default_max_advance_days")]
    pub max_advance_days: i64,
    /// Page size for pitch search results.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u64,
    /// Page size for booking history lists.
    #[serde(default = "default_bookings_page_size")]
    pub bookings_page_size: u64,
    /// Reason sent to the user when an admin rejects without giving one.
    #[serde(default = "default_rejection_reason")]
    pub default_rejection_reason: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_advance_days: default_max_advance_days(),
            search_page_size: default_search_page_size(),
            bookings_page_size: default_bookings_page_size(),
            default_rejection_reason: default_rejection_reason(),
        }
    }
}

fn default_max_advance_days() -> i64 {
    14
}

fn default_search_page_size() -> u64 {
    6
}

fn default_bookings_page_size() -> u64 {
    10
}

fn default_rejection_reason() -> String {
    "The time slot is already taken or the pitch is unavailable.".to_string()
}
