//! A turn as returned by history queries: role and content only.

use serde::{Deserialize, Serialize};

use super::TurnRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: TurnRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
