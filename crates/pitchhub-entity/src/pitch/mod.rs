//! Pitch domain entities.

pub mod model;
pub mod pitch_type;

pub use model::{CreatePitch, Pitch, UpdatePitch};
pub use pitch_type::{CreatePitchType, PitchType};
