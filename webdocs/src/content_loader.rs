//! Load a documentation site from disk
//!
//! Layout of a site directory:
//! 1. `webdocs.toml` - site configuration
//! 2. `docs/NN_key.toml` - one file per category, ordered by the `NN` prefix
//! 3. `docs/<lang>/NN_key.toml` - optional fully translated parallel tree
//! 4. `i18n/<lang>.toml` - UI string catalogs
//!
//! Category files are parsed leniently: a malformed section or category is
//! skipped with a warning instead of failing the whole site.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use toml::{Table, Value};
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::{Catalog, CatalogError};
use crate::document_tree::{
    Category, CategoryTranslation, DocumentTree, Preview, Section, SectionTranslation,
};
use crate::language::Language;
use crate::library::DocumentLibrary;
use crate::site_config::{SiteConfig, SiteConfigError, CONFIG_FILE_NAME};

/// Everything loaded from a site directory
#[derive(Debug)]
pub struct Site {
    /// Root directory of the site
    pub root: PathBuf,
    pub config: SiteConfig,
    pub library: DocumentLibrary,
    pub catalog: Catalog,
}

/// Errors that can occur while loading a site
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("TOML error in {path}: {source}", path = .0.display(), source = .1)]
    TomlError(PathBuf, #[source] toml::de::Error),

    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(PathBuf, #[source] Box<SiteConfigError>),

    #[error("Documentation directory not found: {path}", path = .0.display())]
    MissingDocsDir(PathBuf),

    #[error("Category '{key}' is defined by both {first} and {second}", first = .first.display(), second = .second.display())]
    DuplicateCategory {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
}

/// A category file name split into its order prefix and key
#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryFile {
    order: Option<u32>,
    key: String,
    path: PathBuf,
}

/// Load the whole site rooted at `root`
///
/// # Parameters
/// * `root` - Directory containing webdocs.toml
///
/// # Returns
/// * `Ok(Site)` - Configuration, base and parallel trees, and UI catalogs
/// * `Err(LoadError)` - Configuration or a category file could not be read
pub fn load_site(root: &Path) -> Result<Site, LoadError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    let config = SiteConfig::load(&config_path)
        .map_err(|e| LoadError::ConfigError(config_path.clone(), Box::new(e)))?;

    let docs_dir = root.join(&config.docs_dir);
    if !docs_dir.is_dir() {
        return Err(LoadError::MissingDocsDir(docs_dir));
    }

    let base = load_tree(&docs_dir)?;
    log::info!(
        "Loaded {} categories ({} sections) from {}",
        base.len(),
        base.section_count(),
        docs_dir.display()
    );

    let mut library = DocumentLibrary::new(config.base_language.clone(), base);
    for language in config.display_languages() {
        if language == config.base_language {
            continue;
        }
        let lang_dir = docs_dir.join(language.as_str());
        if !lang_dir.is_dir() {
            log::debug!(
                "No parallel tree for '{}'; using per-section translations",
                language
            );
            continue;
        }
        let tree = load_tree(&lang_dir)?;
        log::info!(
            "Loaded parallel tree for '{}' ({} categories)",
            language,
            tree.len()
        );
        library = library.with_parallel_tree(language, tree);
    }

    let catalog = Catalog::load_dir(
        &root.join(&config.i18n_dir),
        config.base_language.clone(),
    )?;

    Ok(Site {
        root: root.to_path_buf(),
        config,
        library,
        catalog,
    })
}

/// Load every category file directly inside `dir` into a tree
pub fn load_tree(dir: &Path) -> Result<DocumentTree, LoadError> {
    let files = discover_category_files(dir)?;

    #[cfg(feature = "parallel")]
    let parsed: Result<Vec<_>, _> = files.par_iter().map(read_category_file).collect();

    #[cfg(not(feature = "parallel"))]
    let parsed: Result<Vec<_>, _> = files.iter().map(read_category_file).collect();

    let mut tree = DocumentTree::new();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();
    for (file, category) in files.iter().zip(parsed?) {
        if let Some(first) = origins.get(&file.key) {
            return Err(LoadError::DuplicateCategory {
                key: file.key.clone(),
                first: first.clone(),
                second: file.path.clone(),
            });
        }
        origins.insert(file.key.clone(), file.path.clone());

        if let Some(category) = category {
            tree.insert(file.key.clone(), category);
        }
    }

    Ok(tree)
}

/// Find category files in `dir`, in navigation order
fn discover_category_files(dir: &Path) -> Result<Vec<CategoryFile>, LoadError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| LoadError::IoError(dir.to_path_buf(), e.into()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("toml") {
            continue;
        }

        match path.file_stem().and_then(|s| s.to_str()).and_then(parse_file_stem) {
            Some((order, key)) => files.push(CategoryFile {
                order,
                key,
                path: path.to_path_buf(),
            }),
            None => log::warn!("Skipping {}: not a category file name", path.display()),
        }
    }

    Ok(files
        .into_iter()
        .sorted_by(|a, b| {
            (a.order.unwrap_or(u32::MAX), &a.key).cmp(&(b.order.unwrap_or(u32::MAX), &b.key))
        })
        .collect())
}

/// Split a file stem into an optional order prefix and a category key
///
/// Examples:
///   "01_javascript" -> (Some(1), "javascript")
///   "css" -> (None, "css")
///   "02_web_apis" -> (Some(2), "web_apis")
fn parse_file_stem(stem: &str) -> Option<(Option<u32>, String)> {
    let numbered = stem.split_once('_').and_then(|(prefix, rest)| {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        // A prefix too large for u32 is part of the key, not an order
        prefix.parse::<u32>().ok().map(|order| (Some(order), rest))
    });
    let (order, key) = numbered.unwrap_or((None, stem));

    if key.is_empty() {
        return None;
    }
    Some((order, key.to_string()))
}

/// Read and parse one category file
///
/// Returns `Ok(None)` when the file is valid TOML but not a usable category.
fn read_category_file(file: &CategoryFile) -> Result<Option<Category>, LoadError> {
    let content = std::fs::read_to_string(&file.path)
        .map_err(|e| LoadError::IoError(file.path.clone(), e))?;
    let table: Table =
        toml::from_str(&content).map_err(|e| LoadError::TomlError(file.path.clone(), e))?;

    Ok(parse_category(&file.key, &table))
}

/// Build a category from a TOML table, skipping malformed parts
pub fn parse_category(key: &str, table: &Table) -> Option<Category> {
    let Some(raw_sections) = table.get("sections").and_then(Value::as_array) else {
        log::warn!("Skipping category '{}': no sections array", key);
        return None;
    };

    let title = match table.get("title") {
        Some(Value::String(title)) => title.clone(),
        Some(_) => {
            log::warn!("Category '{}' has a non-string title; using its key", key);
            key.to_string()
        }
        None => key.to_string(),
    };

    let sections = raw_sections
        .iter()
        .enumerate()
        .filter_map(|(position, value)| parse_section(key, position, value))
        .collect();

    let translations = language_tables(key, table.get("translations"))
        .map(|(lang, t)| {
            (
                lang,
                CategoryTranslation {
                    title: string_field(t, "title"),
                },
            )
        })
        .collect();

    Some(Category {
        title,
        sections,
        translations,
    })
}

fn parse_section(category: &str, position: usize, value: &Value) -> Option<Section> {
    let Some(table) = value.as_table() else {
        log::warn!("Skipping {}[{}]: section is not a table", category, position);
        return None;
    };

    let (Some(title), Some(content)) = (string_field(table, "title"), string_field(table, "content"))
    else {
        log::warn!(
            "Skipping {}[{}]: title and content must be strings",
            category,
            position
        );
        return None;
    };

    let preview = table.get("preview").and_then(|raw| {
        raw.clone()
            .try_into::<Preview>()
            .inspect_err(|e| log::warn!("Ignoring preview of {}[{}]: {}", category, position, e))
            .ok()
    });

    let translations = language_tables(category, table.get("translations"))
        .map(|(lang, t)| {
            (
                lang,
                SectionTranslation {
                    title: string_field(t, "title"),
                    content: string_field(t, "content"),
                },
            )
        })
        .collect();

    Some(Section {
        title,
        content,
        code: string_field(table, "code"),
        preview,
        translations,
    })
}

/// Iterate over `[translations.<lang>]` tables with valid language codes
fn language_tables<'a>(
    owner: &'a str,
    value: Option<&'a Value>,
) -> impl Iterator<Item = (Language, &'a Table)> + 'a {
    value
        .and_then(Value::as_table)
        .into_iter()
        .flatten()
        .filter_map(move |(code, entry)| {
            let lang = Language::parse(code)
                .inspect_err(|e| log::warn!("Ignoring translation in '{}': {}", owner, e))
                .ok()?;
            Some((lang, entry.as_table()?))
        })
}

fn string_field(table: &Table, name: &str) -> Option<String> {
    table.get(name).and_then(Value::as_str).map(str::to_string)
}
