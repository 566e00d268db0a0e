//! Time slot entities.

pub mod model;

pub use model::{CreateTimeSlot, PitchSlot, PitchTimeSlot, TimeSlot};
