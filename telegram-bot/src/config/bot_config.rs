//! BotConfig: BaseConfig + completion config + conversation settings. Use load() for env-based loading.

use anyhow::Result;
use conversation::ConversationSettings;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::BaseConfig;

/// Built once in `main` and passed down; nothing reads the environment after this.
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub conversation: ConversationSettings,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let conversation = ConversationSettings::from_env();
        Ok(Self {
            base,
            llm,
            conversation,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.llm.validate()?;
        for (name, url) in [
            ("OPENAI_BASE_URL", Some(self.llm.base_url())),
            ("PROXY_URL", self.llm.proxy_url()),
        ] {
            if let Some(url) = url {
                if reqwest::Url::parse(url).is_err() {
                    anyhow::bail!("{} is set but not a valid URL: {}", name, url);
                }
            }
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }
    pub fn conversation(&self) -> ConversationSettings {
        self.conversation
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn prompts_dir(&self) -> &str {
        &self.base.prompts_dir
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
