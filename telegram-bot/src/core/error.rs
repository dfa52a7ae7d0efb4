//! Error types for the Telegram layer.
//!
//! Turn failures never show up here: the conversation service turns them into a fixed
//! message. What remains is transport failure and history clearing.

use conversation::ConversationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Conversation error: {0}")]
    Conversation(#[from] ConversationError),

    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
