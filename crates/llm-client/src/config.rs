//! Completion configuration: trait and env-based implementation.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Completion configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn proxy_url(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
}

/// Completion config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub proxy_url: Option<String>,
    pub timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EnvLlmConfig {
    /// Load from environment variables: OPENAI_API_KEY (required), OPENAI_BASE_URL, MODEL,
    /// PROXY_URL, COMPLETION_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let proxy_url = env::var("PROXY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let timeout_secs = env::var("COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            proxy_url,
            timeout_secs,
        })
    }

    /// Rejects values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("COMPLETION_TIMEOUT_SECS must be positive");
        }
        if self.llm_model.trim().is_empty() {
            anyhow::bail!("MODEL is empty");
        }
        Ok(())
    }
}
