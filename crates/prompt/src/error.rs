use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
