//! In-memory documentation tree
//!
//! A tree maps category keys (e.g. "javascript") to categories, each holding
//! an ordered list of sections. The tree is built once by the content loader
//! and only read afterwards.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// All documentation content for one language, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTree {
    /// Categories in their natural (navigation) order
    categories: IndexMap<String, Category>,
}

/// A top-level documentation topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display title in the base language
    pub title: String,
    /// Sections in stored order; position is the section index
    pub sections: Vec<Section>,
    /// Per-language title overrides
    pub translations: HashMap<Language, CategoryTranslation>,
}

/// Translated category fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTranslation {
    pub title: Option<String>,
}

/// One documentation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section title in the base language
    pub title: String,
    /// Raw HTML body; must be sanitized by whoever renders it
    pub content: String,
    /// Optional code sample
    pub code: Option<String>,
    /// Optional live preview payload
    pub preview: Option<Preview>,
    /// Per-language overrides; each field falls back independently
    pub translations: HashMap<Language, SectionTranslation>,
}

/// Translated section fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTranslation {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Preview payload attached to a code sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    #[serde(rename = "type")]
    pub kind: PreviewKind,
    pub html: Option<String>,
    pub output: Option<String>,
}

/// How a preview is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Rendered HTML
    Visual,
    /// Console output
    Console,
}

impl DocumentTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category, replacing any previous category with the same key
    ///
    /// A replaced category keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, category: Category) -> Option<Category> {
        self.categories.insert(key.into(), category)
    }

    /// Builder-style variant of [`DocumentTree::insert`]
    pub fn with_category(mut self, key: impl Into<String>, category: Category) -> Self {
        self.insert(key, category);
        self
    }

    /// Look up a category by key
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    /// Iterate over `(key, category)` pairs in natural order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Category keys in natural order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the tree has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of sections across all categories
    pub fn section_count(&self) -> usize {
        self.categories.values().map(|c| c.sections.len()).sum()
    }
}

impl Category {
    /// Create a category with no sections
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            translations: HashMap::new(),
        }
    }

    /// Builder-style section append
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

impl Section {
    /// Create a section with only a title and HTML content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            code: None,
            preview: None,
            translations: HashMap::new(),
        }
    }

    /// Builder-style translation override
    pub fn with_translation(mut self, language: Language, translation: SectionTranslation) -> Self {
        self.translations.insert(language, translation);
        self
    }
}
