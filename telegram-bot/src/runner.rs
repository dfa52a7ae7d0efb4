//! Entry point for running the bot: logging, components, dispatcher.

use anyhow::Result;
use tracing::{error, info};

use crate::components::build_bot_components;
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_dispatcher;

/// Runs the bot until the dispatcher stops. Config must already be validated.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    info!(
        database_url = %config.database_url(),
        prompts_dir = %config.prompts_dir(),
        history_limit = config.conversation().history_limit,
        max_tokens = config.conversation().max_tokens,
        "Starting legal assistant bot"
    );

    let components = build_bot_components(&config).await?;

    if let Err(e) = run_dispatcher(components.bot, components.channel, components.service).await {
        error!(error = %e, "Dispatcher failed");
        return Err(e.into());
    }
    Ok(())
}
