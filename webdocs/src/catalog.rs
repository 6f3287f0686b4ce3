//! Interface strings per language
//!
//! Each `i18n/<lang>.toml` file holds nested tables of strings addressed by
//! dotted keys such as `home.searchPlaceholder`. Lookups fall back to the
//! base language and finally to the key itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};
use walkdir::WalkDir;

use crate::language::Language;

/// Errors that can occur when loading catalogs
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),

    #[error("TOML error in {path}: {source}", path = .0.display(), source = .1)]
    TomlError(PathBuf, #[source] toml::de::Error),
}

/// UI strings for every loaded language
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    base: Language,
    tables: HashMap<Language, Table>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new(base: Language) -> Self {
        Self {
            base,
            tables: HashMap::new(),
        }
    }

    /// Add (or replace) the strings for one language
    pub fn with_language(mut self, language: Language, table: Table) -> Self {
        self.tables.insert(language, table);
        self
    }

    /// Load every `<lang>.toml` file in `dir`
    ///
    /// A missing directory yields an empty catalog.
    pub fn load_dir(dir: &Path, base: Language) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(base);
        if !dir.is_dir() {
            log::debug!("No catalog directory at {}", dir.display());
            return Ok(catalog);
        }

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| CatalogError::IoError(dir.to_path_buf(), e.into()))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            let Some(language) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Language::parse(s).ok())
            else {
                log::warn!("Skipping {}: file name is not a language code", path.display());
                continue;
            };

            let content = std::fs::read_to_string(path)
                .map_err(|e| CatalogError::IoError(path.to_path_buf(), e))?;
            let table: Table = toml::from_str(&content)
                .map_err(|e| CatalogError::TomlError(path.to_path_buf(), e))?;
            catalog.tables.insert(language, table);
        }

        log::debug!("Loaded {} UI catalogs", catalog.tables.len());
        Ok(catalog)
    }

    /// Languages with a loaded catalog
    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.tables.keys()
    }

    /// Look up a dotted key for `language`
    ///
    /// # Parameters
    /// * `language` - Display language code; malformed or unknown codes use the base catalog
    /// * `key` - Dotted path, e.g. `navigation.search`
    ///
    /// # Returns
    /// * The string for `language`, else the base-language string, else `key`
    pub fn translate<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        let requested = Language::parse(language).ok();
        requested
            .as_ref()
            .and_then(|lang| self.lookup(lang, key))
            .or_else(|| self.lookup(&self.base, key))
            .unwrap_or(key)
    }

    fn lookup(&self, language: &Language, key: &str) -> Option<&str> {
        let mut table = self.tables.get(language)?;
        let mut parts = key.split('.').peekable();

        while let Some(part) = parts.next() {
            let value = table.get(part)?;
            if parts.peek().is_none() {
                return value.as_str();
            }
            table = match value {
                Value::Table(inner) => inner,
                _ => return None,
            };
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> Language {
        Language::parse(code).unwrap()
    }

    fn catalog() -> Catalog {
        let en: Table = toml::from_str(
            r#"
[navigation]
documentation = "Documentation"
search = "Search"
home = "Home"

[home]
searchPlaceholder = "Search documentation..."
"#,
        )
        .unwrap();
        let fr: Table = toml::from_str(
            r#"
[navigation]
search = "Rechercher"
home = "Accueil"
"#,
        )
        .unwrap();

        Catalog::new(lang("en"))
            .with_language(lang("en"), en)
            .with_language(lang("fr"), fr)
    }

    #[test]
    fn test_translate_requested_language() {
        assert_eq!(catalog().translate("fr", "navigation.search"), "Rechercher");
        assert_eq!(catalog().translate("en", "navigation.search"), "Search");
    }

    #[test]
    fn test_translate_falls_back_to_base() {
        let catalog = catalog();
        assert_eq!(
            catalog.translate("fr", "home.searchPlaceholder"),
            "Search documentation..."
        );
        assert_eq!(catalog.translate("de", "navigation.home"), "Home");
        assert_eq!(catalog.translate("klingon", "navigation.home"), "Home");
    }

    #[test]
    fn test_translate_missing_key_returns_key() {
        let catalog = catalog();
        assert_eq!(catalog.translate("en", "navigation.missing"), "navigation.missing");
        // A table is not a string
        assert_eq!(catalog.translate("en", "navigation"), "navigation");
        // Cannot descend into a string
        assert_eq!(catalog.translate("en", "navigation.home.x"), "navigation.home.x");
        assert_eq!(catalog.translate("en", ""), "");
    }

    #[test]
    fn test_missing_dir_is_empty_catalog() {
        let catalog = Catalog::load_dir(Path::new("/nonexistent/webdocs/i18n"), lang("en")).unwrap();
        assert_eq!(catalog.languages().count(), 0);
        assert_eq!(catalog.translate("en", "home.title"), "home.title");
    }
}
