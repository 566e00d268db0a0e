//! Role-to-capability mapping definitions.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use pitchhub_entity::user::UserRole;

/// Something a caller may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create a booking.
    BookPitch,
    /// Cancel a booking the caller owns.
    CancelOwnBooking,
    /// Review a pitch the caller has played on.
    WriteReview,
    /// Comment on a review or reply to a comment.
    WriteComment,
    /// Add or remove favourite pitches.
    ManageFavorites,
    /// Approve, reject, cancel and list any booking.
    ManageBookings,
    /// Create and edit pitches, pitch types and time slots.
    ManageCatalog,
    /// Create and list vouchers.
    ManageVouchers,
}

impl Capability {
    /// Return the capability as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookPitch => "book_pitch",
            Self::CancelOwnBooking => "cancel_own_booking",
            Self::WriteReview => "write_review",
            Self::WriteComment => "write_comment",
            Self::ManageFavorites => "manage_favorites",
            Self::ManageBookings => "manage_bookings",
            Self::ManageCatalog => "manage_catalog",
            Self::ManageVouchers => "manage_vouchers",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Defines the mapping from each role to its set of capabilities.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of capabilities.
    policies: HashMap<UserRole, HashSet<Capability>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let member = [
            Capability::BookPitch,
            Capability::CancelOwnBooking,
            Capability::WriteReview,
            Capability::WriteComment,
            Capability::ManageFavorites,
        ];
        // Admins run the venue; they do not book it.
        let admin = [
            Capability::WriteComment,
            Capability::ManageFavorites,
            Capability::ManageBookings,
            Capability::ManageCatalog,
            Capability::ManageVouchers,
        ];

        let mut policies = HashMap::new();
        // Guests browse only.
        policies.insert(UserRole::Guest, HashSet::new());
        policies.insert(UserRole::User, member.into_iter().collect());
        policies.insert(UserRole::Admin, admin.into_iter().collect());

        Self { policies }
    }

    /// Checks whether the given role has the specified capability.
    pub fn has_capability(&self, role: UserRole, capability: Capability) -> bool {
        self.policies
            .get(&role)
            .is_some_and(|caps| caps.contains(&capability))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
