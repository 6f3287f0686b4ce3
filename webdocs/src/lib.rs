//! webdocs - search and localized content for a community documentation site
//!
//! The library holds an in-memory documentation tree (categories of HTML
//! sections with optional translations) and offers:
//! - case-insensitive substring search with deterministic result order
//! - per-field language fallback and per-language parallel trees
//! - stable anchor slugs and navigation paths
//! - a debounced query controller for interactive search views
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use webdocs::{Category, DocumentLibrary, DocumentTree, Language, SearchEngine, Section};
//!
//! let tree = DocumentTree::new().with_category(
//!     "javascript",
//!     Category::new("JavaScript")
//!         .with_section(Section::new("Closures", "<p>A closure captures variables.</p>")),
//! );
//! let library = Arc::new(DocumentLibrary::new(Language::default(), tree));
//! let engine = SearchEngine::new(library);
//!
//! let results = engine.search("CLOSURE", "en");
//! assert_eq!(results[0].path, "/docs/javascript#closures");
//! ```

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::enum_variant_names)]

pub mod catalog;
pub mod content_loader;
pub mod controller;
pub mod document_tree;
pub mod html_text;
pub mod language;
pub mod library;
pub mod navigation;
pub mod scaffold;
pub mod search;
pub mod site_config;
pub mod slug;

pub use catalog::Catalog;
pub use content_loader::{load_site, LoadError, Site};
pub use controller::{DisplayState, QueryController};
pub use document_tree::{Category, DocumentTree, Preview, PreviewKind, Section};
pub use language::{Language, LanguageResolver};
pub use library::{DocumentLibrary, DocumentSet};
pub use navigation::NavigationTarget;
pub use search::{SearchEngine, SearchResult};
pub use site_config::SiteConfig;
pub use slug::slugify;
