//! Favourite entities.

pub mod model;

pub use model::Favorite;
