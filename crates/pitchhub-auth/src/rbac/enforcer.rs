//! RBAC enforcement: checks whether a role holds a required capability.

use tracing::warn;

use pitchhub_core::error::AppError;
use pitchhub_entity::user::UserRole;

use super::policies::{Capability, RbacPolicies};

/// Enforces role-based access control before mutations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Ok(())` if the role holds the capability, otherwise an
    /// authorization error.
    pub fn require(&self, role: UserRole, capability: Capability) -> Result<(), AppError> {
        if self.policies.has_capability(role, capability) {
            Ok(())
        } else {
            warn!(%role, %capability, "Capability check denied");
            Err(AppError::authorization(format!(
                "Role '{role}' does not have capability '{capability}'"
            )))
        }
    }

    /// Checks whether the role holds the capability (returns bool).
    pub fn has_capability(&self, role: UserRole, capability: Capability) -> bool {
        self.policies.has_capability(role, capability)
    }
}
