//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for non-streamed chat completion.
//! Owns the outbound HTTP client (optional proxy), the per-call timeout, and token masking for safe logging.
//! Performs no retries: transient API statuses are returned to the caller as errors.

use std::sync::Arc;
use std::time::Duration;

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use thiserror::Error;

pub use async_openai::error::OpenAIError;
pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Default timeout for one completion request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum OpenAIClientError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("OpenAI API error: {0}")]
    Api(#[from] OpenAIError),
    #[error("No response from OpenAI")]
    NoChoices,
    /// The first choice carried no text (null or blank content, e.g. a refusal).
    #[error("OpenAI response has no text content")]
    EmptyContent,
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Connection settings for [`OpenAIClient::with_options`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_key: String,
    /// API base URL including the version segment, e.g. `https://api.openai.com/v1`.
    pub base_url: Option<String>,
    /// Outbound proxy for all API traffic.
    pub proxy_url: Option<String>,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            proxy_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// OpenAI chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
    timeout: Duration,
}

/// Backoff that gives up after the first failure.
fn no_retry_backoff() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

impl OpenAIClient {
    /// Builds a client with custom base URL, proxy and timeout. Fails if the proxy URL is invalid.
    pub fn with_options(options: ClientOptions) -> Result<Self, OpenAIClientError> {
        let mut config = OpenAIConfig::new().with_api_key(options.api_key.clone());
        if let Some(base_url) = &options.base_url {
            config = config.with_api_base(base_url.trim_end_matches('/'));
        }

        let mut http = reqwest::Client::builder();
        if let Some(proxy_url) = &options.proxy_url {
            http = http.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let http = http.build()?;

        let client = Client::with_config(config)
            .with_http_client(http)
            .with_backoff(no_retry_backoff());

        Ok(Self {
            client: Arc::new(client),
            api_key_for_logging: options.api_key,
            timeout: options.timeout,
        })
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs masked API key, request JSON, and token usage. The whole call is bounded by the
    /// configured timeout.
    #[allow(deprecated)]
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, OpenAIClientError> {
        let masked = mask_token(&self.api_key_for_logging);

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            temperature = temperature,
            max_tokens = max_tokens,
            api_key = %masked,
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(max_tokens)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| OpenAIClientError::Timeout(self.timeout))??;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAIClientError::NoChoices)?;
        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => {
                tracing::warn!(
                    finish_reason = ?choice.finish_reason,
                    "OpenAI chat_completion returned no text content"
                );
                Err(OpenAIClientError::EmptyContent)
            }
        }
    }
}
