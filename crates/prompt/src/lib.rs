//! # Prompt
//!
//! Builds the ordered message list sent to the chat-completion API.
//!
//! ## Order
//!
//! - **System**: the governing assistant instruction (always first)
//! - **History**: stored user/assistant turns, oldest first
//! - **Category** (optional): one more system message appended after history,
//!   so a category-specific instruction refines the framing for this turn only
//!
//! ## Resources
//!
//! [`PromptLibrary`] loads the system prompt and the category prompts from a directory of
//! markdown files at startup. Missing files degrade to empty prompts.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs.

mod assemble;
mod category;
mod error;
mod library;

pub use assemble::assemble;
pub use category::PromptCategory;
pub use error::PromptError;
pub use library::{PromptLibrary, SYSTEM_PROMPT_FILE, SYSTEM_PROMPT_KEY};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}
