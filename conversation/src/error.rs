use llm_client::CompletionError;
use prompt::PromptError;
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}

impl From<PromptError> for ConversationError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::InvalidArgument(msg) => ConversationError::InvalidArgument(msg),
        }
    }
}
