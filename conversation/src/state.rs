//! Per-turn lifecycle and its result.

use std::fmt;

/// Shown to the user whenever a turn fails; error detail stays in the logs.
pub const FAILURE_MESSAGE: &str = "⚠️ Произошла ошибка при обработке запроса";

/// Stage of one turn. `Failed` is reachable from every non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    Received,
    PersistingUserMessage,
    Assembling,
    CallingModel,
    PersistingReply,
    Delivered,
    Failed,
}

impl TurnState {
    /// Successor on the success path; `None` for terminal states.
    pub fn next(self) -> Option<TurnState> {
        match self {
            TurnState::Received => Some(TurnState::PersistingUserMessage),
            TurnState::PersistingUserMessage => Some(TurnState::Assembling),
            TurnState::Assembling => Some(TurnState::CallingModel),
            TurnState::CallingModel => Some(TurnState::PersistingReply),
            TurnState::PersistingReply => Some(TurnState::Delivered),
            TurnState::Delivered | TurnState::Failed => None,
        }
    }

    /// Moves a non-terminal state to `Failed` and returns the stage that failed.
    /// Terminal states are left as they are.
    pub fn fail(&mut self) -> TurnState {
        let stage = *self;
        if !stage.is_terminal() {
            *self = TurnState::Failed;
        }
        stage
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TurnState::Delivered | TurnState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnState::Received => "received",
            TurnState::PersistingUserMessage => "persisting_user_message",
            TurnState::Assembling => "assembling",
            TurnState::CallingModel => "calling_model",
            TurnState::PersistingReply => "persisting_reply",
            TurnState::Delivered => "delivered",
            TurnState::Failed => "failed",
        }
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller delivers for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Delivered(String),
    /// `stage` is the state the turn was in when it failed.
    Failed { stage: TurnState },
}

impl TurnOutcome {
    /// Text to show the user: the reply, or [`FAILURE_MESSAGE`].
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Delivered(reply) => reply,
            TurnOutcome::Failed { .. } => FAILURE_MESSAGE,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, TurnOutcome::Delivered(_))
    }
}
