//! Bot configuration: BaseConfig (Telegram + log + DB + prompts) plus the completion and
//! conversation settings owned by their crates.

mod base;
mod bot_config;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
