//! ConversationService: one user turn from incoming text to stored reply.
//!
//! **External interactions:** HistoryStore (SQLite), CompletionClient (OpenAI-compatible API).
//! Every failure is logged here and converted into [`TurnOutcome::Failed`]; callers never see
//! raw errors for a turn.

use std::sync::Arc;

use llm_client::CompletionClient;
use prompt::{assemble, ChatMessage, PromptCategory, PromptLibrary};
use storage::{HistoryEntry, HistoryStore, TurnRole};
use tracing::{debug, error, info, instrument, warn};

use crate::{ConversationError, ConversationSettings, TurnOutcome, TurnState};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const REGENERATE_TEMPERATURE: f32 = 0.9;
/// Appended to the stored user text of a regenerated request.
pub const REGENERATE_SUFFIX: &str = " (variant 2)";

fn to_chat_message(entry: HistoryEntry) -> ChatMessage {
    match entry.role {
        TurnRole::User => ChatMessage::user(entry.content),
        TurnRole::Assistant => ChatMessage::assistant(entry.content),
    }
}

fn with_regenerate_suffix(text: &str) -> String {
    if text.ends_with(REGENERATE_SUFFIX) {
        text.to_string()
    } else {
        format!("{}{}", text, REGENERATE_SUFFIX)
    }
}

fn strip_regenerate_suffix(text: &str) -> &str {
    text.strip_suffix(REGENERATE_SUFFIX).unwrap_or(text)
}

fn log_messages_submitted(messages: &[ChatMessage]) {
    debug!(count = messages.len(), "submit_to_ai: assembled message list");
    for (i, m) in messages.iter().enumerate() {
        debug!(index = i, role = ?m.role, content_len = m.content.len(), "submit_to_ai message");
    }
}

#[derive(Clone)]
pub struct ConversationService {
    store: Arc<dyn HistoryStore>,
    completion: Arc<dyn CompletionClient>,
    prompts: Arc<PromptLibrary>,
    settings: ConversationSettings,
}

impl ConversationService {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        completion: Arc<dyn CompletionClient>,
        prompts: Arc<PromptLibrary>,
        settings: ConversationSettings,
    ) -> Self {
        Self {
            store,
            completion,
            prompts,
            settings,
        }
    }

    // ---------- Turns ----------

    /// Runs one turn. On success the reply is stored as `assistant` and returned; on any
    /// failure the stage is logged and [`TurnOutcome::Failed`] is returned. A user turn that was
    /// already persisted stays persisted.
    #[instrument(skip(self, text, category_prompt), fields(text_len = text.len(), has_category = category_prompt.is_some()))]
    pub async fn handle_turn(
        &self,
        user_id: i64,
        text: &str,
        category_prompt: Option<&str>,
        is_regenerate: bool,
    ) -> TurnOutcome {
        let mut state = TurnState::Received;
        let (user_text, temperature) = if is_regenerate {
            (with_regenerate_suffix(text), REGENERATE_TEMPERATURE)
        } else {
            (text.to_string(), DEFAULT_TEMPERATURE)
        };

        match self
            .run_turn(user_id, &user_text, category_prompt, temperature, &mut state)
            .await
        {
            Ok(reply) => {
                info!(user_id, reply_len = reply.len(), "Turn delivered");
                TurnOutcome::Delivered(reply)
            }
            Err(e) => {
                let stage = state.fail();
                error!(user_id, stage = %stage, to = %state, error = %e, "Turn failed");
                TurnOutcome::Failed { stage }
            }
        }
    }

    async fn run_turn(
        &self,
        user_id: i64,
        user_text: &str,
        category_prompt: Option<&str>,
        temperature: f32,
        state: &mut TurnState,
    ) -> Result<String, ConversationError> {
        advance(state);
        self.store.append(user_id, TurnRole::User, user_text).await?;

        advance(state);
        let history = self
            .store
            .recent(user_id, self.settings.history_limit)
            .await?;
        let messages = assemble(
            self.prompts.system_prompt(),
            history.into_iter().map(to_chat_message),
            category_prompt,
        )?;
        log_messages_submitted(&messages);

        advance(state);
        let reply = self
            .completion
            .complete(&messages, temperature, self.settings.max_tokens)
            .await?;

        advance(state);
        self.store
            .append(user_id, TurnRole::Assistant, &reply)
            .await?;

        advance(state);
        Ok(reply)
    }

    /// Category button: the category title is stored as the user text and the category prompt
    /// (if its resource is non-empty) is appended after history.
    #[instrument(skip(self, category), fields(category = %category))]
    pub async fn handle_category_request(
        &self,
        user_id: i64,
        category: PromptCategory,
    ) -> TurnOutcome {
        let category_prompt = self.prompts.category_prompt(category);
        if category_prompt.is_none() {
            warn!(user_id, category = %category, "Category prompt is empty; sending without it");
        }
        self.handle_turn(user_id, category.title(), category_prompt, false)
            .await
    }

    /// Re-issues the most recent user request at [`REGENERATE_TEMPERATURE`]. `None` when the
    /// user has no stored request; no completion call is made in that case.
    #[instrument(skip(self))]
    pub async fn regenerate(&self, user_id: i64) -> Option<TurnOutcome> {
        let history = match self
            .store
            .recent(user_id, self.settings.history_limit)
            .await
        {
            Ok(h) => h,
            Err(e) => {
                let mut state = TurnState::Received;
                let stage = state.fail();
                error!(
                    user_id,
                    stage = %stage,
                    to = %state,
                    error = %e,
                    "Failed to read history for regenerate"
                );
                return Some(TurnOutcome::Failed { stage });
            }
        };

        let last_request = history
            .into_iter()
            .rev()
            .find(|entry| entry.role == TurnRole::User)?;
        let text = strip_regenerate_suffix(&last_request.content).to_string();
        Some(self.handle_turn(user_id, &text, None, true).await)
    }

    /// Deletes all stored turns of the user.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: i64) -> Result<(), ConversationError> {
        self.store.clear(user_id).await?;
        info!(user_id, "History cleared");
        Ok(())
    }
}

fn advance(state: &mut TurnState) {
    if let Some(next) = state.next() {
        debug!(from = %state, to = %next, "Turn state");
        *state = next;
    }
}
