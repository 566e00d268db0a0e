//! Booking lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a booking.
///
/// ```text
/// Pending --approve--> Confirmed --cancel--> Cancelled
///    |  \--reject---> Rejected
///    \----cancel----> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved by an admin.
    Confirmed,
    /// Refused by an admin.
    Rejected,
    /// Withdrawn by the user or an admin.
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status holds its slot.
    pub fn blocks_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether an admin may approve or reject from this status.
    pub fn can_decide(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the booking may be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Check whether `self -> next` is an allowed transition.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match next {
            Self::Confirmed | Self::Rejected => self.can_decide(),
            Self::Cancelled => self.can_cancel(),
            Self::Pending => false,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = pitchhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(pitchhub_core::AppError::field(
                "status",
                format!("Invalid booking status: '{s}'"),
            )),
        }
    }
}
