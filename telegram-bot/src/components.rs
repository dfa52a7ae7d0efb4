//! Builds the long-lived pieces shared by all updates: history store, completion client,
//! prompt library, conversation service and the Telegram bot.

use std::sync::Arc;

use anyhow::{Context, Result};
use conversation::ConversationService;
use llm_client::{mask_token, CompletionClient, LlmConfig, OpenAICompletionClient};
use prompt::PromptLibrary;
use storage::{HistoryStore, SqliteHistoryStore};
use teloxide::Bot;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::telegram::{build_bot, ReplyChannel, TelegramReplyChannel};

pub struct BotComponents {
    pub bot: Bot,
    pub channel: Arc<dyn ReplyChannel>,
    pub service: Arc<ConversationService>,
}

#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let store: Arc<dyn HistoryStore> = Arc::new(
        SqliteHistoryStore::new(config.database_url())
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url(),
                    "Failed to initialize history storage"
                );
                e
            })
            .context("Failed to initialize history storage")?,
    );

    let completion: Arc<dyn CompletionClient> = Arc::new(
        OpenAICompletionClient::from_config(config.llm())
            .context("Failed to build completion client")?,
    );
    info!(
        model = %config.llm().model(),
        base_url = %config.llm().base_url(),
        api_key = %mask_token(config.llm().api_key()),
        proxy = config.llm().proxy_url().is_some(),
        timeout_secs = config.llm().timeout().as_secs(),
        "Completion client ready"
    );

    let prompts = Arc::new(PromptLibrary::load_from_dir(config.prompts_dir()));

    let service = Arc::new(ConversationService::new(
        store,
        completion,
        prompts,
        config.conversation(),
    ));

    let bot = build_bot(config.bot_token(), config.telegram_api_url());
    let channel: Arc<dyn ReplyChannel> = Arc::new(TelegramReplyChannel::new(bot.clone()));

    Ok(BotComponents {
        bot,
        channel,
        service,
    })
}
