//! Legal categories offered to the user, each backed by one prompt resource.

use std::fmt;

/// A topic the user can pick from the keyboard; selects an extra system prompt for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptCategory {
    LawLabor,
    LawHousing,
    LawCivil,
    LawFamily,
    GenerateContract,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 5] = [
        PromptCategory::LawLabor,
        PromptCategory::LawHousing,
        PromptCategory::LawCivil,
        PromptCategory::LawFamily,
        PromptCategory::GenerateContract,
    ];

    /// Stable identifier, also used as the button payload.
    pub fn key(&self) -> &'static str {
        match self {
            PromptCategory::LawLabor => "law_labor",
            PromptCategory::LawHousing => "law_housing",
            PromptCategory::LawCivil => "law_civil",
            PromptCategory::LawFamily => "law_family",
            PromptCategory::GenerateContract => "generate_contract",
        }
    }

    /// Prompt resource file name inside the prompts directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            PromptCategory::LawLabor => "work.md",
            PromptCategory::LawHousing => "housing.md",
            PromptCategory::LawCivil => "civil.md",
            PromptCategory::LawFamily => "family.md",
            PromptCategory::GenerateContract => "contract.md",
        }
    }

    /// Human-readable name; stored as the user's request when the category is picked.
    pub fn title(&self) -> &'static str {
        match self {
            PromptCategory::LawLabor => "Трудовое право",
            PromptCategory::LawHousing => "Жилищное право",
            PromptCategory::LawCivil => "Гражданское право",
            PromptCategory::LawFamily => "Семейное право",
            PromptCategory::GenerateContract => "Составить документ",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
