//! Button payloads decoded into explicit actions. Nothing past this module sees raw callback data.

use std::fmt;
use std::str::FromStr;

use prompt::PromptCategory;
use thiserror::Error;

pub const REGENERATE_PAYLOAD: &str = "generate_again";
pub const CLEAR_HISTORY_PAYLOAD: &str = "clear_history";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown button payload: {0}")]
    UnknownPayload(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    CategoryRequest(PromptCategory),
    Regenerate,
    ClearHistory,
}

impl BotAction {
    pub fn decode(payload: &str) -> Result<Self, ActionError> {
        match payload {
            REGENERATE_PAYLOAD => Ok(BotAction::Regenerate),
            CLEAR_HISTORY_PAYLOAD => Ok(BotAction::ClearHistory),
            other => PromptCategory::from_key(other)
                .map(BotAction::CategoryRequest)
                .ok_or_else(|| ActionError::UnknownPayload(other.to_string())),
        }
    }

    /// Callback data carried by the button for this action.
    pub fn payload(&self) -> &'static str {
        match self {
            BotAction::CategoryRequest(category) => category.key(),
            BotAction::Regenerate => REGENERATE_PAYLOAD,
            BotAction::ClearHistory => CLEAR_HISTORY_PAYLOAD,
        }
    }
}

impl FromStr for BotAction {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for BotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_payloads() {
        assert_eq!(BotAction::decode("generate_again"), Ok(BotAction::Regenerate));
        assert_eq!(BotAction::decode("clear_history"), Ok(BotAction::ClearHistory));
        assert_eq!(
            BotAction::decode("law_family"),
            Ok(BotAction::CategoryRequest(PromptCategory::LawFamily))
        );
        assert_eq!(
            "generate_contract".parse::<BotAction>(),
            Ok(BotAction::CategoryRequest(PromptCategory::GenerateContract))
        );
    }

    #[test]
    fn test_decode_unknown_payload() {
        assert_eq!(
            BotAction::decode("law_space"),
            Err(ActionError::UnknownPayload("law_space".to_string()))
        );
        assert!(BotAction::decode("").is_err());
    }

    #[test]
    fn test_payload_decodes_back() {
        let mut actions = vec![BotAction::Regenerate, BotAction::ClearHistory];
        actions.extend(PromptCategory::ALL.into_iter().map(BotAction::CategoryRequest));
        for action in actions {
            assert_eq!(BotAction::decode(action.payload()), Ok(action));
        }
    }
}
