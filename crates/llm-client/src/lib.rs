//! # Completion client abstraction
//!
//! Defines the [`CompletionClient`] trait and an OpenAI implementation. Transport-agnostic;
//! used by the conversation service, which picks temperature and token cap per call.

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, OpenAIClientError,
    OpenAIError,
};
use prompt::{ChatMessage, MessageRole};
use thiserror::Error;

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use openai_client::mask_token;
pub use openai_llm::OpenAICompletionClient;

/// Failure of one completion call. No variant is retried by the client.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),
    /// Network failure, non-2xx status or undecodable response.
    #[error("Completion request failed: {0}")]
    Api(#[source] OpenAIClientError),
    #[error("Completion returned no choices")]
    EmptyResponse,
    #[error("Invalid completion request: {0}")]
    InvalidRequest(String),
}

impl From<OpenAIClientError> for CompletionError {
    fn from(e: OpenAIClientError) -> Self {
        match e {
            OpenAIClientError::Timeout(d) => CompletionError::Timeout(d),
            OpenAIClientError::NoChoices | OpenAIClientError::EmptyContent => {
                CompletionError::EmptyResponse
            }
            OpenAIClientError::Api(OpenAIError::InvalidArgument(msg)) => {
                CompletionError::InvalidRequest(msg)
            }
            other => CompletionError::Api(other),
        }
    }
}

/// Sends an assembled message list to a completion endpoint and returns the reply text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, CompletionError> {
    let content = msg.content.clone();
    let built: Result<ChatCompletionRequestMessage, OpenAIError> = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
    };
    built.map_err(|e| CompletionError::InvalidRequest(e.to_string()))
}
