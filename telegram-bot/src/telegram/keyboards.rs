//! Inline keyboards: category picker and the reply actions under each answer.

use prompt::PromptCategory;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::actions::BotAction;

fn action_button(text: &str, action: BotAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text, action.payload())
}

fn category_button(text: &str, category: PromptCategory) -> InlineKeyboardButton {
    action_button(text, BotAction::CategoryRequest(category))
}

/// Category picker sent after /start.
pub fn main_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![category_button(
            "📄 Составить документ",
            PromptCategory::GenerateContract,
        )],
        vec![
            category_button("💼 Трудовое право", PromptCategory::LawLabor),
            category_button("🏠 Жилищное право", PromptCategory::LawHousing),
        ],
        vec![
            category_button("👪 Семейное право", PromptCategory::LawFamily),
            category_button("💰 Гражданское право", PromptCategory::LawCivil),
        ],
    ])
}

/// Attached to every delivered answer.
pub fn reply_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![action_button("🧹 Очистить историю", BotAction::ClearHistory)],
        vec![action_button("Сгенерировать снова", BotAction::Regenerate)],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn payloads(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
        markup
            .inline_keyboard
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| match &b.kind {
                        InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                        other => panic!("unexpected button kind: {:?}", other),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_main_keyboard_layout() {
        assert_eq!(
            payloads(&main_keyboard()),
            vec![
                vec!["generate_contract".to_string()],
                vec!["law_labor".to_string(), "law_housing".to_string()],
                vec!["law_family".to_string(), "law_civil".to_string()],
            ]
        );
    }

    #[test]
    fn test_every_button_decodes() {
        for markup in [main_keyboard(), reply_keyboard()] {
            for row in payloads(&markup) {
                for payload in row {
                    assert!(BotAction::decode(&payload).is_ok(), "{}", payload);
                }
            }
        }
    }

    #[test]
    fn test_reply_keyboard_labels() {
        let markup = reply_keyboard();
        assert_eq!(markup.inline_keyboard[0][0].text, "🧹 Очистить историю");
        assert_eq!(markup.inline_keyboard[1][0].text, "Сгенерировать снова");
        assert_eq!(
            payloads(&markup),
            vec![
                vec!["clear_history".to_string()],
                vec!["generate_again".to_string()]
            ]
        );
    }
}
