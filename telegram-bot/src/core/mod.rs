//! Core: bot error type and logger.

pub mod error;
pub mod logger;

pub use error::{BotError, Result};
pub use logger::init_tracing;
