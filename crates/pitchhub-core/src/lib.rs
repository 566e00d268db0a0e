//! # pitchhub-core
//!
//! Core crate for PitchHub. Contains configuration schemas, pagination
//! types, the collaborator traits implemented by other crates, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other PitchHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
