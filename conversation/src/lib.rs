//! # Conversation
//!
//! Orchestrates one turn of the legal assistant: persist the user message, assemble the
//! prompt from stored history, call the completion API, persist and return the reply.
//!
//! ## Modules
//!
//! - [`service`] – ConversationService (handle_turn, category requests, regenerate, clear)
//! - [`state`] – TurnState lifecycle and TurnOutcome
//! - [`config`] – ConversationSettings
//! - [`error`] – ConversationError

mod config;
mod error;
mod service;
mod state;

pub use config::{ConversationSettings, DEFAULT_MAX_REPLY_TOKENS};
pub use error::ConversationError;
pub use service::{
    ConversationService, DEFAULT_TEMPERATURE, REGENERATE_SUFFIX, REGENERATE_TEMPERATURE,
};
pub use state::{TurnOutcome, TurnState, FAILURE_MESSAGE};
