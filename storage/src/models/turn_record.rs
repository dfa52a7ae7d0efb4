//! Turn record model for persistence.
//!
//! Maps to one row of the `messages` table and is written by SqliteHistoryStore.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Who produced a stored turn. System instructions are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(StorageError::InvalidArgument(format!(
                "unknown turn role: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub user_id: i64,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TurnRecord {
    /// Creates a new record stamped with the current time.
    pub fn new(user_id: i64, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Fixed-width RFC 3339 text (microsecond precision) so that lexical order equals time order.
    pub fn timestamp_text(&self) -> String {
        self.timestamp
            .format("%Y-%m-%dT%H:%M:%S%.6fZ")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_turn_role_round_trips_through_text() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            assert_eq!(role.as_str().parse::<TurnRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_turn_role_rejects_system() {
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_timestamp_text_is_fixed_width() {
        let mut record = TurnRecord::new(1, TurnRole::User, "hi");
        record.timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(record.timestamp_text(), "2024-01-02T03:04:05.000000Z");
    }
}
