//! Convenience result type alias for PitchHub.

use crate::error::AppError;

/// A specialized `Result` type for PitchHub operations.
pub type AppResult<T> = Result<T, AppError>;
