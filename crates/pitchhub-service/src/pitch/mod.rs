//! Pitch catalogue: search, detail and admin maintenance.

pub mod search;
pub mod service;

pub use search::{PitchSearchQuery, PitchSort, PriceRange};
pub use service::{AttachSlotRequest, CatalogService, PitchDetail};
