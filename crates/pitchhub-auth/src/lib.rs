//! # pitchhub-auth
//!
//! Authentication and authorization for PitchHub.
//!
//! ## Modules
//!
//! - `jwt`: JWT access token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: Capability gate in front of every mutation
//! - `activation`: Account activation token generation

pub mod activation;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use activation::{ActivationToken, ActivationTokenGenerator};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{Capability, RbacEnforcer, RbacPolicies};
