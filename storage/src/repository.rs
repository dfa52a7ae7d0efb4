use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{HistoryEntry, TurnRole};

/// Append-only log of conversation turns, partitioned by user.
///
/// Implementations never edit a stored turn; the only destructive operation is [`clear`](HistoryStore::clear),
/// which removes every turn of one user.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Writes one turn stamped with the current time.
    async fn append(&self, user_id: i64, role: TurnRole, content: &str) -> Result<(), StorageError>;

    /// Returns at most `limit` most recent turns of `user_id`, oldest first.
    /// `limit <= 0` is rejected with [`StorageError::InvalidArgument`].
    async fn recent(&self, user_id: i64, limit: i64) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Deletes all turns of `user_id`. Succeeds when the user has no history.
    async fn clear(&self, user_id: i64) -> Result<(), StorageError>;
}
