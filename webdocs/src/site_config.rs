//! Site configuration from webdocs.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::language::Language;
use crate::search::DEFAULT_EXCERPT_LENGTH;

/// Name of the configuration file at the root of a site
pub const CONFIG_FILE_NAME: &str = "webdocs.toml";

/// Main site configuration from webdocs.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Human-readable site title
    pub site_title: String,

    /// Language whose content is authoritative
    #[serde(default)]
    pub base_language: Language,

    /// Languages offered to readers (the base language is implied)
    #[serde(default)]
    pub languages: Vec<Language>,

    /// Directory holding category files, relative to the site root
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Directory holding UI string catalogs, relative to the site root
    #[serde(default = "default_i18n_dir")]
    pub i18n_dir: PathBuf,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiescence window before a typed query is scanned, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Characters kept in a result excerpt (150..=200)
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            excerpt_length: default_excerpt_length(),
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_i18n_dir() -> PathBuf {
    PathBuf::from("i18n")
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}

impl SiteConfig {
    /// Create a configuration with defaults for everything but the title
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
            base_language: Language::default(),
            languages: Vec::new(),
            docs_dir: default_docs_dir(),
            i18n_dir: default_i18n_dir(),
            search: SearchConfig::default(),
        }
    }

    /// Load configuration from a webdocs.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the webdocs.toml configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Successfully loaded configuration
    /// * `Err(SiteConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let content = fs::read_to_string(&path).map_err(SiteConfigError::IoError)?;

        let config: SiteConfig = toml::from_str(&content).map_err(SiteConfigError::ParseError)?;

        Ok(config)
    }

    /// Save configuration to a webdocs.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the webdocs.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(SiteConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteConfigError> {
        let content = toml::to_string_pretty(self).map_err(SiteConfigError::SerializeError)?;

        fs::write(&path, content).map_err(SiteConfigError::IoError)?;

        Ok(())
    }

    /// The debounce window as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// All display languages, base language first, without duplicates
    pub fn display_languages(&self) -> Vec<Language> {
        let mut all = vec![self.base_language.clone()];
        for lang in &self.languages {
            if !all.contains(lang) {
                all.push(lang.clone());
            }
        }
        all
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum SiteConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    IoError(#[source] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(#[source] toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    SerializeError(#[source] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_roundtrip() {
        let mut config = SiteConfig::new("Web Development Documentation");
        config.languages = vec![Language::parse("fr").unwrap()];
        config.search.debounce_ms = 250;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SiteConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.site_title, "Web Development Documentation");
        assert_eq!(parsed.base_language.as_str(), "en");
        assert_eq!(parsed.languages, config.languages);
        assert_eq!(parsed.search.debounce_ms, 250);
        assert_eq!(parsed.docs_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = SiteConfig::new("Docs");
        config.languages = vec![Language::parse("de").unwrap()];
        config.search.excerpt_length = 160;
        config.save(&path).unwrap();

        let loaded = SiteConfig::load(&path).unwrap();
        assert_eq!(loaded.site_title, "Docs");
        assert_eq!(loaded.languages, config.languages);
        assert_eq!(loaded.search.excerpt_length, 160);
        assert_eq!(loaded.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SiteConfig::load(dir.path().join(CONFIG_FILE_NAME));
        assert!(matches!(result, Err(SiteConfigError::IoError(_))));
    }

    #[test]
    fn test_parse_minimal_toml_uses_defaults() {
        let config: SiteConfig = toml::from_str("site_title = \"Docs\"").unwrap();

        assert_eq!(config.base_language, Language::default());
        assert!(config.languages.is_empty());
        assert_eq!(config.i18n_dir, PathBuf::from("i18n"));
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.search.excerpt_length, 200);
    }

    #[test]
    fn test_parse_example_toml() {
        let toml_content = r#"
site_title = "Documentation Développement Web"
base_language = "en"
languages = ["fr", "en"]
docs_dir = "content"

[search]
debounce_ms = 150
excerpt_length = 180
"#;

        let config: SiteConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("content"));
        assert_eq!(config.search.excerpt_length, 180);
        let langs: Vec<_> = config.display_languages().iter().map(|l| l.to_string()).collect();
        assert_eq!(langs, vec!["en", "fr"]);
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let result = toml::from_str::<SiteConfig>("site_title = \"x\"\nbase_language = \"english\"");
        assert!(result.is_err());
    }
}
