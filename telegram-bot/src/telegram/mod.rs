//! Telegram layer: reply channel, keyboards, texts, update handling and the teloxide dispatcher.

mod channel;
mod dispatcher;
mod handlers;
mod keyboards;
mod texts;

pub use channel::{ReplyChannel, TelegramReplyChannel};
pub use dispatcher::{build_bot, run_dispatcher, schema, Command};
pub use handlers::{
    deliver, handle_action, handle_help, handle_start, handle_text, CallbackContext, ChatContext,
};
pub use keyboards::{main_keyboard, reply_keyboard};
pub use texts::{
    CHOOSE_CATEGORY_TEXT, HELP_TEXT, HISTORY_CLEARED_TEXT, NOTHING_TO_REGENERATE_TEXT,
    WELCOME_TEXT,
};
