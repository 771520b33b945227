//! Service Layer Error Types
//!
//! Errors for graph query operations. Outcomes such as "entity not found"
//! or "no path within N steps" are not errors; they are ordinary variants of
//! the operation's outcome type.

use crate::db::DatabaseError;
use thiserror::Error;

/// Graph query operation errors
#[derive(Error, Debug)]
pub enum GraphServiceError {
    /// Database operation failed; the whole operation is aborted
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] DatabaseError),

    /// A caller-supplied argument was outside its allowed range
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Path search was cancelled between BFS levels
    #[error("Path search cancelled at depth {depth}")]
    Cancelled { depth: usize },
}

impl GraphServiceError {
    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller rather than the store
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
