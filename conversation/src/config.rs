//! Conversation settings loaded from environment variables.

use std::env;

use storage::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationSettings {
    /// Number of most recent turns sent with each request.
    pub history_limit: i64,
    /// Reply token cap per completion call.
    pub max_tokens: u32,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_tokens: DEFAULT_MAX_REPLY_TOKENS,
        }
    }
}

impl ConversationSettings {
    /// Reads HISTORY_LIMIT and MAX_REPLY_TOKENS; unparsable or non-positive values fall back to defaults.
    pub fn from_env() -> Self {
        let history_limit = env::var("HISTORY_LIMIT")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);
        let max_tokens = env::var("MAX_REPLY_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_REPLY_TOKENS);
        Self {
            history_limit,
            max_tokens,
        }
    }
}
