//! Convenience result type alias for DeckHub.

use crate::error::AppError;

/// A specialized `Result` type for DeckHub operations.
pub type AppResult<T> = Result<T, AppError>;
