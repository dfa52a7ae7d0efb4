//! OpenAI implementation of [`CompletionClient`]: converts chat messages and delegates to openai-client.

use async_trait::async_trait;
use openai_client::{ClientOptions, OpenAIClient, OpenAIClientError};
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionClient, CompletionError, LlmConfig};

#[derive(Clone)]
pub struct OpenAICompletionClient {
    client: OpenAIClient,
    model: String,
}

impl OpenAICompletionClient {
    /// Builds the client from config (base URL, proxy, timeout, model).
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self, OpenAIClientError> {
        let client = OpenAIClient::with_options(ClientOptions {
            api_key: config.api_key().to_string(),
            base_url: Some(config.base_url().to_string()),
            proxy_url: config.proxy_url().map(str::to_string),
            timeout: config.timeout(),
        })?;
        Ok(Self {
            client,
            model: config.model().to_string(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    #[instrument(skip(self, messages), fields(model = %self.model, message_count = messages.len()))]
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self
            .client
            .chat_completion(&self.model, openai_messages, temperature, max_tokens)
            .await?)
    }
}
