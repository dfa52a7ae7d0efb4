//! Update handling independent of teloxide types: commands, text messages, button actions and
//! delivery of turn outcomes. The dispatcher extracts ids and text and calls into here.

use conversation::{ConversationService, TurnOutcome, FAILURE_MESSAGE};
use tracing::{error, info, instrument, warn};

use super::keyboards::{main_keyboard, reply_keyboard};
use super::texts::{
    CHOOSE_CATEGORY_TEXT, HELP_TEXT, HISTORY_CLEARED_TEXT, NOTHING_TO_REGENERATE_TEXT,
    WELCOME_TEXT,
};
use super::ReplyChannel;
use crate::actions::BotAction;
use crate::core::Result;

/// Where an update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatContext {
    pub chat_id: i64,
    pub user_id: i64,
}

/// Callback query being handled: its id (answered exactly once) and the message that carried
/// the button, if Telegram still exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackContext {
    pub id: String,
    pub message_id: Option<i32>,
}

/// Typing indicator is best-effort; failure only gets logged.
async fn show_typing(channel: &dyn ReplyChannel, chat_id: i64) {
    if let Err(e) = channel.send_typing(chat_id).await {
        warn!(chat_id, error = %e, "Failed to send typing action");
    }
}

async fn answer_callback(channel: &dyn ReplyChannel, callback: &CallbackContext, text: Option<&str>) {
    if let Err(e) = channel.answer_callback(&callback.id, text).await {
        warn!(callback_id = %callback.id, error = %e, "Failed to answer callback query");
    }
}

pub async fn handle_start(channel: &dyn ReplyChannel, chat_id: i64) -> Result<()> {
    channel.send_text(chat_id, WELCOME_TEXT, None).await?;
    channel
        .send_text(chat_id, CHOOSE_CATEGORY_TEXT, Some(main_keyboard()))
        .await
}

pub async fn handle_help(channel: &dyn ReplyChannel, chat_id: i64) -> Result<()> {
    channel.send_text(chat_id, HELP_TEXT, None).await
}

/// A free-text question: one turn, answer sent as a new message.
#[instrument(skip(channel, service, ctx, text), fields(chat_id = ctx.chat_id, user_id = ctx.user_id))]
pub async fn handle_text(
    channel: &dyn ReplyChannel,
    service: &ConversationService,
    ctx: ChatContext,
    text: &str,
) -> Result<()> {
    show_typing(channel, ctx.chat_id).await;
    let outcome = service.handle_turn(ctx.user_id, text, None, false).await;
    deliver(channel, ctx.chat_id, None, &outcome).await
}

/// A decoded button press. Answers the callback exactly once.
#[instrument(skip(channel, service, ctx, callback, action), fields(chat_id = ctx.chat_id, user_id = ctx.user_id, action = %action))]
pub async fn handle_action(
    channel: &dyn ReplyChannel,
    service: &ConversationService,
    ctx: ChatContext,
    callback: &CallbackContext,
    action: BotAction,
) -> Result<()> {
    match action {
        BotAction::CategoryRequest(category) => {
            answer_callback(channel, callback, None).await;
            show_typing(channel, ctx.chat_id).await;
            let outcome = service.handle_category_request(ctx.user_id, category).await;
            deliver(channel, ctx.chat_id, callback.message_id, &outcome).await
        }
        BotAction::Regenerate => {
            answer_callback(channel, callback, None).await;
            show_typing(channel, ctx.chat_id).await;
            match service.regenerate(ctx.user_id).await {
                Some(outcome) => deliver(channel, ctx.chat_id, callback.message_id, &outcome).await,
                None => {
                    info!(user_id = ctx.user_id, "Nothing to regenerate");
                    channel
                        .send_text(ctx.chat_id, NOTHING_TO_REGENERATE_TEXT, None)
                        .await
                }
            }
        }
        BotAction::ClearHistory => {
            let answer = match service.clear(ctx.user_id).await {
                Ok(()) => HISTORY_CLEARED_TEXT,
                Err(e) => {
                    error!(user_id = ctx.user_id, error = %e, "Failed to clear history");
                    FAILURE_MESSAGE
                }
            };
            answer_callback(channel, callback, Some(answer)).await;
            Ok(())
        }
    }
}

/// Sends a turn outcome. A delivered reply edits `edit_target` when given (falling back to a
/// new message if the edit fails) and carries the reply keyboard; a failure is a plain message.
pub async fn deliver(
    channel: &dyn ReplyChannel,
    chat_id: i64,
    edit_target: Option<i32>,
    outcome: &TurnOutcome,
) -> Result<()> {
    match outcome {
        TurnOutcome::Delivered(reply) => {
            if let Some(message_id) = edit_target {
                match channel
                    .edit_text(chat_id, message_id, reply, Some(reply_keyboard()))
                    .await
                {
                    Ok(()) => return Ok(()),
                    Err(e) => {
                        warn!(chat_id, message_id, error = %e, "Edit failed; sending a new message")
                    }
                }
            }
            channel
                .send_text(chat_id, reply, Some(reply_keyboard()))
                .await
        }
        TurnOutcome::Failed { stage } => {
            info!(chat_id, stage = %stage, "Sending failure message");
            channel.send_text(chat_id, outcome.text(), None).await
        }
    }
}
