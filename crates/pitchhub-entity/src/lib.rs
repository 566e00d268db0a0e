//! # pitchhub-entity
//!
//! Domain entity models for PitchHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod booking;
pub mod comment;
pub mod favorite;
pub mod pitch;
pub mod review;
pub mod slot;
pub mod user;
pub mod voucher;
