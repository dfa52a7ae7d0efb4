//! History repository: persistence and queries for conversation turns.
//!
//! Uses SqlitePoolManager and the models (TurnRecord, HistoryEntry).
//! External: SQLite via sqlx; callers go through the [`HistoryStore`] trait.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::{HistoryEntry, TurnRecord, TurnRole};
use crate::repository::HistoryStore;
use crate::sqlite_pool::SqlitePoolManager;

/// Number of turns returned by a history query when the caller has no preference.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteHistoryStore {
    /// Opens (or creates) the database and makes sure the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    /// Idempotent schema creation; safe on every startup.
    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating history tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_messages_user_timestamp ON messages(user_id, timestamp)",
        )
        .execute(pool)
        .await?;

        info!("History tables ready");
        Ok(())
    }

    /// Persists a prepared record inside its own transaction.
    pub async fn save(&self, record: &TurnRecord) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        sqlx::query(
            "INSERT INTO messages (user_id, role, content, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(record.user_id)
        .bind(record.role.as_str())
        .bind(&record.content)
        .bind(record.timestamp_text())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            user_id = record.user_id,
            role = %record.role,
            content_len = record.content.len(),
            "Saved turn"
        );
        Ok(())
    }

    /// Number of stored turns for one user.
    pub async fn count(&self, user_id: i64) -> Result<i64, StorageError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(total.0)
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    #[instrument(skip(self, content))]
    async fn append(&self, user_id: i64, role: TurnRole, content: &str) -> Result<(), StorageError> {
        self.save(&TurnRecord::new(user_id, role, content)).await
    }

    #[instrument(skip(self))]
    async fn recent(&self, user_id: i64, limit: i64) -> Result<Vec<HistoryEntry>, StorageError> {
        if limit <= 0 {
            return Err(StorageError::InvalidArgument(format!(
                "history limit must be positive, got {}",
                limit
            )));
        }

        // Newest first so LIMIT keeps the tail of the conversation; id breaks timestamp ties.
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT role, content FROM messages WHERE user_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        let mut history = rows
            .into_iter()
            .map(|(role, content)| Ok(HistoryEntry::new(role.parse()?, content)))
            .collect::<Result<Vec<_>, StorageError>>()?;
        history.reverse();

        debug!(user_id, count = history.len(), "Loaded recent history");
        Ok(history)
    }

    #[instrument(skip(self))]
    async fn clear(&self, user_id: i64) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let result = sqlx::query("DELETE FROM messages WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            user_id,
            deleted = result.rows_affected(),
            "Cleared conversation history"
        );
        Ok(())
    }
}
