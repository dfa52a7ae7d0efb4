//! teloxide Dispatcher: routes commands, text messages and callback queries to the handlers.
//! Updates of one chat are processed in order (teloxide's default distribution by chat id).

use std::sync::Arc;

use conversation::ConversationService;
use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::{CallbackQuery, Message},
    utils::command::BotCommands,
};
use tracing::{debug, error, info, instrument, warn};

use super::handlers::{self, CallbackContext, ChatContext};
use super::ReplyChannel;
use crate::actions::BotAction;
use crate::core::{BotError, Result};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "приветствие и выбор категории")]
    Start,
    #[command(description = "как пользоваться ботом")]
    Help,
}

/// Creates the teloxide Bot, pointing it at a custom Bot API server when configured.
pub fn build_bot(token: &str, api_url: Option<&str>) -> Bot {
    let bot = Bot::new(token);
    match api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

pub fn schema() -> UpdateHandler<BotError> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(dptree::endpoint(on_message));

    let callback_handler = Update::filter_callback_query().endpoint(on_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn on_command(msg: Message, cmd: Command, channel: Arc<dyn ReplyChannel>) -> Result<()> {
    let chat_id = msg.chat.id.0;
    info!(chat_id, command = ?cmd, "Received command");
    match cmd {
        Command::Start => handlers::handle_start(channel.as_ref(), chat_id).await,
        Command::Help => handlers::handle_help(channel.as_ref(), chat_id).await,
    }
}

async fn on_message(
    msg: Message,
    channel: Arc<dyn ReplyChannel>,
    service: Arc<ConversationService>,
) -> Result<()> {
    let chat_id = msg.chat.id.0;
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        debug!(chat_id, "Ignoring non-text message");
        return Ok(());
    };
    let ctx = ChatContext {
        chat_id,
        user_id: user.id.0 as i64,
    };
    info!(
        user_id = ctx.user_id,
        chat_id,
        text_len = text.len(),
        "Received message"
    );
    handlers::handle_text(channel.as_ref(), &service, ctx, text).await
}

async fn on_callback(
    q: CallbackQuery,
    channel: Arc<dyn ReplyChannel>,
    service: Arc<ConversationService>,
) -> Result<()> {
    let callback = CallbackContext {
        id: q.id.to_string(),
        message_id: q.message.as_ref().map(|m| m.id().0),
    };
    let payload = q.data.as_deref().unwrap_or_default();

    let (action, chat_id) = match (BotAction::decode(payload), q.message.as_ref()) {
        (Ok(action), Some(m)) => (action, m.chat().id.0),
        (Err(e), _) => {
            warn!(user_id = q.from.id.0, error = %e, "Ignoring callback");
            return channel.answer_callback(&callback.id, None).await;
        }
        (Ok(action), None) => {
            warn!(user_id = q.from.id.0, action = %action, "Callback without a message");
            return channel.answer_callback(&callback.id, None).await;
        }
    };

    let ctx = ChatContext {
        chat_id,
        user_id: q.from.id.0 as i64,
    };
    info!(user_id = ctx.user_id, chat_id, action = %action, "Received callback");
    handlers::handle_action(channel.as_ref(), &service, ctx, &callback, action).await
}

/// Drops pending updates, registers the command list and long-polls until Ctrl-C.
#[instrument(skip_all)]
pub async fn run_dispatcher(
    bot: Bot,
    channel: Arc<dyn ReplyChannel>,
    service: Arc<ConversationService>,
) -> Result<()> {
    bot.delete_webhook().drop_pending_updates(true).await?;
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Bot started"),
        Err(e) => warn!(error = %e, "get_me failed"),
    }

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![channel, service])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
