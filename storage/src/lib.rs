//! Storage crate: per-user conversation history persistence.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TurnRecord, TurnRole, HistoryEntry
//! - [`repository`] – HistoryStore trait
//! - [`history_repo`] – SqliteHistoryStore (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod history_repo;
mod models;
mod repository;
mod sqlite_pool;


pub use error::StorageError;
pub use history_repo::{SqliteHistoryStore, DEFAULT_HISTORY_LIMIT};
pub use models::{HistoryEntry, TurnRecord, TurnRole};
pub use repository::HistoryStore;
pub use sqlite_pool::SqlitePoolManager;
