//! Outbound Telegram operations behind a trait. Production code talks to the Bot API through
//! [`TelegramReplyChannel`]; tests substitute a recording implementation.

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatAction, InlineKeyboardMarkup, MessageId},
};

use crate::core::Result;

#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;

    async fn send_typing(&self, chat_id: i64) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}

/// Thin wrapper around teloxide::Bot.
#[derive(Clone)]
pub struct TelegramReplyChannel {
    bot: Bot,
}

impl TelegramReplyChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ReplyChannel for TelegramReplyChannel {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        match keyboard {
            Some(k) => request.reply_markup(k).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text);
        match keyboard {
            Some(k) => request.reply_markup(k).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let request = self.bot.answer_callback_query(teloxide::types::CallbackQueryId(callback_id.to_string()));
        match text {
            Some(t) => request.text(t).await?,
            None => request.await?,
        };
        Ok(())
    }
}
