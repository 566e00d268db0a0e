//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod comment;
pub mod favorite;
pub mod health;
pub mod pitch;
