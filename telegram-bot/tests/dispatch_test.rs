//! Integration tests for update handling (commands, text, button actions, delivery).
//!
//! Uses a recording ReplyChannel instead of the Bot API, in-memory SQLite for history and a
//! scripted CompletionClient; does not call Telegram or OpenAI.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use conversation::{ConversationService, ConversationSettings, FAILURE_MESSAGE};
use llm_client::{CompletionClient, CompletionError};
use prompt::{ChatMessage, PromptCategory, PromptLibrary};
use storage::{HistoryEntry, HistoryStore, SqliteHistoryStore, StorageError, TurnRole};
use telegram_bot::telegram::{
    handle_action, handle_help, handle_start, handle_text, main_keyboard, reply_keyboard,
    CallbackContext, ChatContext, CHOOSE_CATEGORY_TEXT, HELP_TEXT, HISTORY_CLEARED_TEXT,
    NOTHING_TO_REGENERATE_TEXT, WELCOME_TEXT,
};
use telegram_bot::{BotAction, BotError, ReplyChannel, Result};
use teloxide::types::InlineKeyboardMarkup;

const CHAT_ID: i64 = 500;
const USER_ID: i64 = 42;
const BUTTON_MESSAGE_ID: i32 = 77;

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Text {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Edit {
        message_id: i32,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Typing,
    Answer {
        id: String,
        text: Option<String>,
    },
}

/// Records every outbound call. `fail_edits` makes edit_text fail like a deleted message would.
#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<Sent>>,
    fail_edits: bool,
}

impl RecordingChannel {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn without_typing(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| *s != Sent::Typing)
            .collect()
    }
}

#[async_trait]
impl ReplyChannel for RecordingChannel {
    async fn send_text(
        &self,
        _chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Text {
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn edit_text(
        &self,
        _chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        if self.fail_edits {
            return Err(BotError::Bot("message to edit not found".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Edit {
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn send_typing(&self, _chat_id: i64) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Typing);
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Answer {
            id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }
}

/// Replies from a script, then "ответ"; records the messages of every call.
#[derive(Default)]
struct ScriptedCompletion {
    script: Mutex<VecDeque<std::result::Result<String, CompletionError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _temperature: f32,
        _max_tokens: u32,
    ) -> std::result::Result<String, CompletionError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ответ".to_string()))
    }
}

struct Fixture {
    channel: RecordingChannel,
    service: ConversationService,
    store: Arc<SqliteHistoryStore>,
    completion: Arc<ScriptedCompletion>,
}

async fn fixture(script: Vec<std::result::Result<String, CompletionError>>, fail_edits: bool) -> Fixture {
    let store = Arc::new(
        SqliteHistoryStore::new("sqlite::memory:")
            .await
            .expect("in-memory store"),
    );
    let completion = Arc::new(ScriptedCompletion {
        script: Mutex::new(script.into()),
        calls: Mutex::new(Vec::new()),
    });
    let prompts = Arc::new(PromptLibrary::from_parts(
        "Ты юридический ассистент.",
        vec![(PromptCategory::LawHousing, "Жилищный кодекс РФ.".to_string())],
    ));
    let service = ConversationService::new(
        store.clone(),
        completion.clone(),
        prompts,
        ConversationSettings::default(),
    );
    Fixture {
        channel: RecordingChannel {
            sent: Mutex::new(Vec::new()),
            fail_edits,
        },
        service,
        store,
        completion,
    }
}

fn ctx() -> ChatContext {
    ChatContext {
        chat_id: CHAT_ID,
        user_id: USER_ID,
    }
}

fn callback() -> CallbackContext {
    CallbackContext {
        id: "cb-1".to_string(),
        message_id: Some(BUTTON_MESSAGE_ID),
    }
}

/// **Test: /start sends the welcome text, then the category picker.**
#[tokio::test]
async fn test_start_sends_welcome_and_categories() {
    let f = fixture(vec![], false).await;
    handle_start(&f.channel, CHAT_ID).await.unwrap();
    assert_eq!(
        f.channel.sent(),
        vec![
            Sent::Text {
                text: WELCOME_TEXT.to_string(),
                keyboard: None
            },
            Sent::Text {
                text: CHOOSE_CATEGORY_TEXT.to_string(),
                keyboard: Some(main_keyboard())
            },
        ]
    );
}

#[tokio::test]
async fn test_help() {
    let f = fixture(vec![], false).await;
    handle_help(&f.channel, CHAT_ID).await.unwrap();
    assert_eq!(
        f.channel.sent(),
        vec![Sent::Text {
            text: HELP_TEXT.to_string(),
            keyboard: None
        }]
    );
}

/// **Test: A question shows typing, then the answer arrives as a new message with the reply keyboard.**
#[tokio::test]
async fn test_text_message_delivers_answer() {
    let f = fixture(vec![Ok("Обратитесь в суд.".to_string())], false).await;
    handle_text(&f.channel, &f.service, ctx(), "Как оформить развод?")
        .await
        .unwrap();

    assert_eq!(
        f.channel.sent(),
        vec![
            Sent::Typing,
            Sent::Text {
                text: "Обратитесь в суд.".to_string(),
                keyboard: Some(reply_keyboard())
            },
        ]
    );
    let history = f.store.recent(USER_ID, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, TurnRole::Assistant);
}

/// **Test: A failed turn sends only the fixed failure text, without a keyboard.**
#[tokio::test]
async fn test_text_message_failure_sends_fixed_message() {
    let f = fixture(
        vec![Err(CompletionError::Timeout(Duration::from_secs(30)))],
        false,
    )
    .await;
    handle_text(&f.channel, &f.service, ctx(), "Вопрос")
        .await
        .unwrap();

    assert_eq!(
        f.channel.without_typing(),
        vec![Sent::Text {
            text: FAILURE_MESSAGE.to_string(),
            keyboard: None
        }]
    );
}

/// **Test: Category button answers the callback first, then edits the button message.**
#[tokio::test]
async fn test_category_action_edits_button_message() {
    let f = fixture(vec![Ok("Про аренду.".to_string())], false).await;
    handle_action(
        &f.channel,
        &f.service,
        ctx(),
        &callback(),
        BotAction::CategoryRequest(PromptCategory::LawHousing),
    )
    .await
    .unwrap();

    assert_eq!(
        f.channel.without_typing(),
        vec![
            Sent::Answer {
                id: "cb-1".to_string(),
                text: None
            },
            Sent::Edit {
                message_id: BUTTON_MESSAGE_ID,
                text: "Про аренду.".to_string(),
                keyboard: Some(reply_keyboard())
            },
        ]
    );
    let calls = f.completion.calls.lock().unwrap().clone();
    assert_eq!(
        calls[0].last(),
        Some(&ChatMessage::system("Жилищный кодекс РФ."))
    );
}

/// **Test: When the edit fails the answer is sent as a new message.**
#[tokio::test]
async fn test_failed_edit_falls_back_to_send() {
    let f = fixture(vec![Ok("Ответ.".to_string())], true).await;
    handle_action(
        &f.channel,
        &f.service,
        ctx(),
        &callback(),
        BotAction::CategoryRequest(PromptCategory::LawCivil),
    )
    .await
    .unwrap();

    assert_eq!(
        f.channel.without_typing().last(),
        Some(&Sent::Text {
            text: "Ответ.".to_string(),
            keyboard: Some(reply_keyboard())
        })
    );
}

/// **Test: Regenerate with no history sends a notice and calls no model.**
#[tokio::test]
async fn test_regenerate_without_history() {
    let f = fixture(vec![], false).await;
    handle_action(&f.channel, &f.service, ctx(), &callback(), BotAction::Regenerate)
        .await
        .unwrap();

    assert_eq!(
        f.channel.without_typing(),
        vec![
            Sent::Answer {
                id: "cb-1".to_string(),
                text: None
            },
            Sent::Text {
                text: NOTHING_TO_REGENERATE_TEXT.to_string(),
                keyboard: None
            },
        ]
    );
    assert!(f.completion.calls.lock().unwrap().is_empty());
}

/// **Test: Regenerate after a question edits the answer message with the new variant.**
#[tokio::test]
async fn test_regenerate_after_question() {
    let f = fixture(
        vec![Ok("Первый вариант.".to_string()), Ok("Второй вариант.".to_string())],
        false,
    )
    .await;
    handle_text(&f.channel, &f.service, ctx(), "Вопрос")
        .await
        .unwrap();
    handle_action(&f.channel, &f.service, ctx(), &callback(), BotAction::Regenerate)
        .await
        .unwrap();

    assert_eq!(
        f.channel.without_typing().last(),
        Some(&Sent::Edit {
            message_id: BUTTON_MESSAGE_ID,
            text: "Второй вариант.".to_string(),
            keyboard: Some(reply_keyboard())
        })
    );
    let history = f.store.recent(USER_ID, 10).await.unwrap();
    assert_eq!(history[2].content, "Вопрос (variant 2)");
}

/// **Test: Clear history empties the store and answers the callback with the confirmation.**
#[tokio::test]
async fn test_clear_history_action() {
    let f = fixture(vec![], false).await;
    handle_text(&f.channel, &f.service, ctx(), "Вопрос")
        .await
        .unwrap();
    handle_action(&f.channel, &f.service, ctx(), &callback(), BotAction::ClearHistory)
        .await
        .unwrap();

    assert_eq!(
        f.channel.sent().last(),
        Some(&Sent::Answer {
            id: "cb-1".to_string(),
            text: Some(HISTORY_CLEARED_TEXT.to_string())
        })
    );
    assert!(f.store.recent(USER_ID, 10).await.unwrap().is_empty());
}

/// SQLite-backed store whose `clear` always fails with a database error.
struct ClearFailingStore(SqliteHistoryStore);

#[async_trait]
impl HistoryStore for ClearFailingStore {
    async fn append(
        &self,
        user_id: i64,
        role: TurnRole,
        content: &str,
    ) -> std::result::Result<(), StorageError> {
        self.0.append(user_id, role, content).await
    }

    async fn recent(
        &self,
        user_id: i64,
        limit: i64,
    ) -> std::result::Result<Vec<HistoryEntry>, StorageError> {
        self.0.recent(user_id, limit).await
    }

    async fn clear(&self, _user_id: i64) -> std::result::Result<(), StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolClosed))
    }
}

/// **Test: A failed clear answers the callback with the failure message and keeps history.**
#[tokio::test]
async fn test_clear_history_failure_answers_failure_message() {
    let store = Arc::new(ClearFailingStore(
        SqliteHistoryStore::new("sqlite::memory:")
            .await
            .expect("in-memory store"),
    ));
    let prompts = Arc::new(PromptLibrary::from_parts(
        "Ты юридический ассистент.",
        vec![(PromptCategory::LawHousing, "Жилищный кодекс РФ.".to_string())],
    ));
    let service = ConversationService::new(
        store.clone(),
        Arc::new(ScriptedCompletion::default()),
        prompts,
        ConversationSettings::default(),
    );
    let channel = RecordingChannel {
        sent: Mutex::new(Vec::new()),
        fail_edits: false,
    };

    handle_text(&channel, &service, ctx(), "Вопрос").await.unwrap();
    handle_action(&channel, &service, ctx(), &callback(), BotAction::ClearHistory)
        .await
        .unwrap();

    assert_eq!(
        channel.sent().last(),
        Some(&Sent::Answer {
            id: "cb-1".to_string(),
            text: Some(FAILURE_MESSAGE.to_string())
        })
    );
    assert_eq!(store.0.recent(USER_ID, 10).await.unwrap().len(), 2);
}
