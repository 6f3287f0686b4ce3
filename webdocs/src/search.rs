//! Case-insensitive substring search over the documentation tree
//!
//! Every query is a fresh linear scan: no index is kept, results are not
//! ranked and come back in category order, then section order.

use std::sync::Arc;

use serde::Serialize;

use crate::html_text::{excerpt, strip_tags};
use crate::library::DocumentLibrary;
use crate::navigation::NavigationTarget;

/// Default number of characters kept in a result excerpt
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Smallest accepted excerpt length
pub const MIN_EXCERPT_LENGTH: usize = 150;

/// Largest accepted excerpt length
pub const MAX_EXCERPT_LENGTH: usize = 200;

/// One matching section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Category key (e.g. "javascript")
    pub category: String,
    /// Section title in the display language, original case
    pub title: String,
    /// Tag-stripped content excerpt ending in "..."
    pub content: String,
    /// Navigation path, `/docs/{category}#{anchor}`
    pub path: String,
    /// Position of the section within its category
    pub section_index: usize,
}

impl SearchResult {
    /// Navigation target for this result
    pub fn target(&self) -> NavigationTarget {
        NavigationTarget {
            category: self.category.clone(),
            anchor: self
                .path
                .rsplit_once('#')
                .map(|(_, anchor)| anchor.to_string()),
            section_index: Some(self.section_index),
        }
    }
}

/// Scans a [`DocumentLibrary`] for sections containing a query
#[derive(Debug, Clone)]
pub struct SearchEngine {
    library: Arc<DocumentLibrary>,
    excerpt_length: usize,
}

impl SearchEngine {
    /// Create an engine over a shared library
    pub fn new(library: Arc<DocumentLibrary>) -> Self {
        Self {
            library,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }

    /// Set the excerpt length, clamped to the accepted range
    pub fn with_excerpt_length(mut self, length: usize) -> Self {
        let clamped = length.clamp(MIN_EXCERPT_LENGTH, MAX_EXCERPT_LENGTH);
        if clamped != length {
            log::warn!(
                "Excerpt length {} is outside {}..={}, using {}",
                length,
                MIN_EXCERPT_LENGTH,
                MAX_EXCERPT_LENGTH,
                clamped
            );
        }
        self.excerpt_length = clamped;
        self
    }

    /// The library being searched
    pub fn library(&self) -> &Arc<DocumentLibrary> {
        &self.library
    }

    /// Find every section whose title or stripped content contains `query`
    ///
    /// # Parameters
    /// * `query` - Free text; matched case-insensitively as a literal substring
    /// * `language` - Display language code; unknown codes fall back to base content
    ///
    /// # Returns
    /// * `Vec<SearchResult>` - Matches in category order, then section order.
    ///   Empty when `query` is empty.
    pub fn search(&self, query: &str, language: &str) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let set = self.library.document_set(language);
        let mut results = Vec::new();
        let mut scanned = 0usize;

        for category in set.categories() {
            for section in &category.sections {
                scanned += 1;
                let plain = strip_tags(section.content);
                let matched = section.title.to_lowercase().contains(&needle)
                    || plain.to_lowercase().contains(&needle);
                if !matched {
                    continue;
                }

                log::trace!("Match in {}/{}", category.key, section.anchor);
                results.push(SearchResult {
                    category: category.key.to_string(),
                    title: section.title.to_string(),
                    content: excerpt(&plain, self.excerpt_length),
                    path: NavigationTarget::path_for(category.key, &section.anchor),
                    section_index: section.index,
                });
            }
        }

        log::debug!(
            "Search '{}' ({}) scanned {} sections, {} matches",
            query,
            set.language(),
            scanned,
            results.len()
        );
        results
    }
}
