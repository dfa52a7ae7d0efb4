//! Prompt assembly: system prompt + history + optional category prompt.

use crate::{ChatMessage, PromptError};

/// Builds the message list for one completion request.
///
/// Output order: `System(system_prompt)`, then `history` as given, then `System(category_prompt)`
/// when present. Fails with [`PromptError::InvalidArgument`] if `system_prompt` is blank; the model
/// is never called without a governing instruction.
pub fn assemble<I>(
    system_prompt: &str,
    history: I,
    category_prompt: Option<&str>,
) -> Result<Vec<ChatMessage>, PromptError>
where
    I: IntoIterator<Item = ChatMessage>,
{
    if system_prompt.trim().is_empty() {
        return Err(PromptError::InvalidArgument(
            "system prompt must not be empty".to_string(),
        ));
    }

    let mut messages = vec![ChatMessage::system(system_prompt)];
    messages.extend(history);
    if let Some(category) = category_prompt {
        messages.push(ChatMessage::system(category));
    }
    Ok(messages)
}
