//! Prompt resources loaded once at startup.
//!
//! External: reads `<dir>/legal_prompt.md` and one file per [`PromptCategory`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{error, info};

use crate::PromptCategory;

/// Key of the default system prompt.
pub const SYSTEM_PROMPT_KEY: &str = "legal_assistant";

/// File holding the default system prompt.
pub const SYSTEM_PROMPT_FILE: &str = "legal_prompt.md";

/// System prompt plus per-category prompts. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    system: String,
    categories: HashMap<PromptCategory, String>,
}

impl PromptLibrary {
    pub fn from_parts<I>(system: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = (PromptCategory, String)>,
    {
        Self {
            system: system.into(),
            categories: categories.into_iter().collect(),
        }
    }

    /// Loads every prompt file from `dir`. A missing or unreadable file is logged and becomes `""`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let system = load_prompt(&dir.join(SYSTEM_PROMPT_FILE));
        let categories = PromptCategory::ALL
            .into_iter()
            .map(|c| (c, load_prompt(&dir.join(c.file_name()))))
            .collect();

        let library = Self { system, categories };
        info!(
            dir = %dir.display(),
            system_prompt_len = library.system.len(),
            categories_loaded = library.categories.values().filter(|p| !p.is_empty()).count(),
            "Prompt library loaded"
        );
        library
    }

    pub fn system_prompt(&self) -> &str {
        &self.system
    }

    /// Prompt for `category`, or `None` if its resource was empty or missing.
    pub fn category_prompt(&self, category: PromptCategory) -> Option<&str> {
        self.categories
            .get(&category)
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
    }

    /// Looks a prompt up by key: `legal_assistant` or a category key.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == SYSTEM_PROMPT_KEY {
            return Some(&self.system);
        }
        PromptCategory::from_key(key)
            .and_then(|c| self.categories.get(&c))
            .map(String::as_str)
    }
}

fn load_prompt(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(path = %path.display(), "Prompt file not found");
            String::new()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read prompt file");
            String::new()
        }
    }
}
