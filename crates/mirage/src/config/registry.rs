//! Read-only table of supported languages
//!
//! Built once when the configuration is loaded and shared (behind an `Arc`)
//! by every request afterwards.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::{ConfigError, Language};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "HashMap<String, Language>")]
pub struct LanguageRegistry {
    languages: HashMap<String, Language>,
}

impl LanguageRegistry {
    /// Look up a language by key
    pub fn lookup(&self, key: &str) -> Result<&Language, ConfigError> {
        self.languages
            .get(key)
            .ok_or_else(|| ConfigError::LanguageNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.languages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// All languages, sorted by key
    pub fn sorted(&self) -> Vec<&Language> {
        let mut languages: Vec<_> = self.languages.values().collect();
        languages.sort_by(|a, b| a.key.cmp(&b.key));
        languages
    }
}

impl From<HashMap<String, Language>> for LanguageRegistry {
    fn from(mut languages: HashMap<String, Language>) -> Self {
        for (key, language) in &mut languages {
            language.key.clone_from(key);
        }
        Self { languages }
    }
}
