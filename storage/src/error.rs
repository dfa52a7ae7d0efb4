//! Storage error types.
//!
//! Returned by [`crate::HistoryStore`] implementations; the conversation layer wraps them.

use thiserror::Error;

/// Errors that can occur when reading or writing conversation history.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Caller passed a value the store refuses to coerce (e.g. a non-positive limit).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
