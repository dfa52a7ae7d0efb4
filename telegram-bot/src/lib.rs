//! # Legal assistant Telegram bot
//!
//! Wires storage, prompt library, completion client and conversation service behind a teloxide
//! dispatcher. Loads config from env and long-polls Telegram.

pub mod actions;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod runner;
pub mod telegram;

pub use actions::{ActionError, BotAction};
pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use self::core::{init_tracing, BotError, Result};
pub use runner::run_bot;
pub use telegram::{ReplyChannel, TelegramReplyChannel};
