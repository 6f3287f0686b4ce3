//! Display languages and per-field translation fallback

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document_tree::{Category, Section};

/// A two-letter, lowercase language code such as `en` or `fr`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

/// Errors that can occur when parsing a language code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Invalid language code '{0}': expected two ASCII letters (e.g. 'en')")]
    InvalidCode(String),
}

impl Language {
    /// Parse a language code, normalizing it to lowercase
    ///
    /// # Parameters
    /// * `code` - Code as supplied by the caller (e.g. "fr", "FR", " en ")
    ///
    /// # Returns
    /// * `Ok(Language)` - Normalized two-letter code
    /// * `Err(LanguageError)` - The code is not two ASCII letters
    pub fn parse(code: &str) -> Result<Self, LanguageError> {
        let trimmed = code.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(LanguageError::InvalidCode(code.to_string()))
        }
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = LanguageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title and content of a section as displayed in one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedText<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Resolves translated fields against a base language
///
/// Each field falls back on its own: a translated title with no translated
/// content yields the translated title and the base content.
#[derive(Debug, Clone, Default)]
pub struct LanguageResolver {
    base: Language,
}

impl LanguageResolver {
    /// Create a resolver whose authoritative content is in `base`
    pub fn new(base: Language) -> Self {
        Self { base }
    }

    /// The base language
    pub fn base(&self) -> &Language {
        &self.base
    }

    /// Resolve a section's title and content for `language`
    pub fn resolve_section<'a>(&self, section: &'a Section, language: &Language) -> ResolvedText<'a> {
        if *language == self.base {
            return ResolvedText {
                title: &section.title,
                content: &section.content,
            };
        }

        let translation = section.translations.get(language);
        ResolvedText {
            title: translation
                .and_then(|t| t.title.as_deref())
                .unwrap_or(&section.title),
            content: translation
                .and_then(|t| t.content.as_deref())
                .unwrap_or(&section.content),
        }
    }

    /// Resolve a category title for `language`
    pub fn resolve_category_title<'a>(&self, category: &'a Category, language: &Language) -> &'a str {
        if *language == self.base {
            return &category.title;
        }

        category
            .translations
            .get(language)
            .and_then(|t| t.title.as_deref())
            .unwrap_or(&category.title)
    }
}
