//! Favourite pitches.

pub mod service;

pub use service::{FavoriteService, FavoriteToggle};
