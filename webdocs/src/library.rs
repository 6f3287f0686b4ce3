//! Base tree plus optional per-language parallel trees
//!
//! [`DocumentLibrary::document_set`] picks the tree a language is displayed
//! from: a fully translated parallel tree when one is loaded, otherwise the
//! base tree with per-field fallback through the [`LanguageResolver`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::document_tree::{Category, DocumentTree, Section};
use crate::language::{Language, LanguageResolver};
use crate::slug::AnchorSet;

/// Read-only collection of documentation trees shared by all consumers
#[derive(Debug, Clone)]
pub struct DocumentLibrary {
    base: Arc<DocumentTree>,
    parallel: HashMap<Language, Arc<DocumentTree>>,
    resolver: LanguageResolver,
}

impl DocumentLibrary {
    /// Create a library from a base-language tree
    pub fn new(base_language: Language, base: DocumentTree) -> Self {
        Self {
            base: Arc::new(base),
            parallel: HashMap::new(),
            resolver: LanguageResolver::new(base_language),
        }
    }

    /// Register a fully translated tree for `language`
    ///
    /// A tree registered for the base language is ignored.
    pub fn with_parallel_tree(mut self, language: Language, tree: DocumentTree) -> Self {
        if language == *self.resolver.base() {
            log::warn!(
                "Ignoring parallel tree for base language '{}'",
                language
            );
            return self;
        }
        self.parallel.insert(language, Arc::new(tree));
        self
    }

    /// The resolver used for per-field fallback
    pub fn resolver(&self) -> &LanguageResolver {
        &self.resolver
    }

    /// The base language
    pub fn base_language(&self) -> &Language {
        self.resolver.base()
    }

    /// The base-language tree
    pub fn base_tree(&self) -> &DocumentTree {
        &self.base
    }

    /// Languages that have a parallel tree loaded
    pub fn parallel_languages(&self) -> impl Iterator<Item = &Language> {
        self.parallel.keys()
    }

    /// Select the documents to display for `language`
    ///
    /// `language` is an opaque code from the caller. A malformed code is
    /// treated like a language without translations.
    pub fn document_set(&self, language: &str) -> DocumentSet<'_> {
        let language = match Language::parse(language) {
            Ok(lang) => lang,
            Err(e) => {
                log::warn!("{}; falling back to '{}'", e, self.resolver.base());
                self.resolver.base().clone()
            }
        };

        let tree = self.parallel.get(&language).unwrap_or(&self.base);
        DocumentSet {
            tree,
            resolver: &self.resolver,
            language,
        }
    }
}

/// The documents for one display language
#[derive(Debug)]
pub struct DocumentSet<'a> {
    tree: &'a DocumentTree,
    resolver: &'a LanguageResolver,
    language: Language,
}

/// A category with titles resolved for one language
#[derive(Debug, Clone)]
pub struct ResolvedCategory<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub sections: Vec<ResolvedSection<'a>>,
}

/// A section with title/content resolved and its anchor assigned
#[derive(Debug, Clone)]
pub struct ResolvedSection<'a> {
    /// Position within the category
    pub index: usize,
    pub title: &'a str,
    /// Raw HTML content
    pub content: &'a str,
    /// Collision-free anchor within the category
    pub anchor: String,
    /// The underlying section (code sample, preview)
    pub section: &'a Section,
}

impl<'a> DocumentSet<'a> {
    /// The language this set is displayed in
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// The underlying tree
    pub fn tree(&self) -> &'a DocumentTree {
        self.tree
    }

    /// Iterate over all categories, resolved, in natural order
    pub fn categories(&self) -> impl Iterator<Item = ResolvedCategory<'a>> + '_ {
        self.tree
            .iter()
            .map(move |(key, category)| self.resolve_category(key, category))
    }

    /// Resolve one category by key
    pub fn category(&self, key: &str) -> Option<ResolvedCategory<'a>> {
        let (key, category) = self.tree.iter().find(|(k, _)| *k == key)?;
        Some(self.resolve_category(key, category))
    }

    fn resolve_category(&self, key: &'a str, category: &'a Category) -> ResolvedCategory<'a> {
        let mut anchors = AnchorSet::new();
        let sections = category
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let text = self.resolver.resolve_section(section, &self.language);
                ResolvedSection {
                    index,
                    title: text.title,
                    content: text.content,
                    anchor: anchors.assign(text.title),
                    section,
                }
            })
            .collect();

        ResolvedCategory {
            key,
            title: self.resolver.resolve_category_title(category, &self.language),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_tree::SectionTranslation;

    fn lang(code: &str) -> Language {
        Language::parse(code).unwrap()
    }

    fn base_tree() -> DocumentTree {
        DocumentTree::new().with_category(
            "javascript",
            Category::new("JavaScript")
                .with_section(
                    Section::new("Closures", "<p>A closure captures variables.</p>").with_translation(
                        lang("fr"),
                        SectionTranslation {
                            title: Some("Fermetures".to_string()),
                            content: None,
                        },
                    ),
                )
                .with_section(Section::new("Closures", "<p>Again.</p>")),
        )
    }

    #[test]
    fn test_base_set_uses_per_field_resolution() {
        let library = DocumentLibrary::new(lang("en"), base_tree());
        let set = library.document_set("fr");
        let category = set.category("javascript").unwrap();
        assert_eq!(category.sections[0].title, "Fermetures");
        assert_eq!(category.sections[0].anchor, "fermetures");
        assert_eq!(category.sections[1].title, "Closures");
    }

    #[test]
    fn test_anchors_are_disambiguated() {
        let library = DocumentLibrary::new(lang("en"), base_tree());
        let set = library.document_set("en");
        let category = set.category("javascript").unwrap();
        assert_eq!(category.sections[0].anchor, "closures");
        assert_eq!(category.sections[1].anchor, "closures-1");
    }

    #[test]
    fn test_parallel_tree_is_selected() {
        let french = DocumentTree::new().with_category(
            "javascript",
            Category::new("JavaScript").with_section(Section::new("Portée", "<p>La portée.</p>")),
        );
        let library = DocumentLibrary::new(lang("en"), base_tree()).with_parallel_tree(lang("fr"), french);

        let set = library.document_set("fr");
        let category = set.category("javascript").unwrap();
        assert_eq!(category.sections.len(), 1);
        assert_eq!(category.sections[0].title, "Portée");

        // Languages without a parallel tree still read the base tree
        let set = library.document_set("de");
        assert_eq!(set.category("javascript").unwrap().sections.len(), 2);
    }

    #[test]
    fn test_malformed_language_falls_back_to_base() {
        let library = DocumentLibrary::new(lang("en"), base_tree());
        let set = library.document_set("not-a-language");
        assert_eq!(set.language(), &lang("en"));
        assert_eq!(set.category("javascript").unwrap().sections[0].title, "Closures");
    }

    #[test]
    fn test_parallel_tree_for_base_language_is_ignored() {
        let library =
            DocumentLibrary::new(lang("en"), base_tree()).with_parallel_tree(lang("en"), DocumentTree::new());
        assert_eq!(library.parallel_languages().count(), 0);
        assert_eq!(library.document_set("en").tree().len(), 1);
    }
}
