//! Embedded starter site
//!
//! `webdocs init` writes these files into an empty directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Placeholder replaced by the site title in webdocs.toml
const TITLE_PLACEHOLDER: &str = "\"{{TITLE}}\"";

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Web Development Documentation";

/// Starter files (relative path, content)
const STARTER_FILES: &[(&str, &str)] = &[
    ("webdocs.toml", include_str!("templates/starter/webdocs.toml")),
    (
        "docs/01_javascript.toml",
        include_str!("templates/starter/docs/01_javascript.toml"),
    ),
    ("docs/02_css.toml", include_str!("templates/starter/docs/02_css.toml")),
    ("i18n/en.toml", include_str!("templates/starter/i18n/en.toml")),
    ("i18n/fr.toml", include_str!("templates/starter/i18n/fr.toml")),
];

/// Errors that can occur while writing the starter site
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Target directory is not empty: {path}. Use --force to overwrite existing files", path = .0.display())]
    NotEmpty(PathBuf),

    #[error("IO error writing {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, #[source] std::io::Error),
}

/// Relative paths of the files [`write_starter_site`] creates
pub fn starter_paths() -> impl Iterator<Item = &'static str> {
    STARTER_FILES.iter().map(|(path, _)| *path)
}

/// Write the starter site into `target`
///
/// # Parameters
/// * `target` - Directory to populate (created if missing)
/// * `title` - Site title written to webdocs.toml
/// * `force` - Overwrite even if `target` already has entries
///
/// # Returns
/// * `Ok(usize)` - Number of files written
/// * `Err(ScaffoldError)` - Directory not empty, or a write failed
pub fn write_starter_site(target: &Path, title: Option<&str>, force: bool) -> Result<usize, ScaffoldError> {
    if !target.exists() {
        std::fs::create_dir_all(target).map_err(|e| ScaffoldError::IoError(target.to_path_buf(), e))?;
    }

    if !force && !is_empty_dir(target) {
        return Err(ScaffoldError::NotEmpty(target.to_path_buf()));
    }

    let title_value = toml::Value::String(title.unwrap_or(DEFAULT_TITLE).to_string()).to_string();
    let mut written = 0;

    for (relative, content) in STARTER_FILES {
        let full_path = target.join(relative);

        // Create parent directories if needed
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::IoError(parent.to_path_buf(), e))?;
        }

        let content = content.replace(TITLE_PLACEHOLDER, &title_value);
        std::fs::write(&full_path, content).map_err(|e| ScaffoldError::IoError(full_path.clone(), e))?;
        log::debug!("Wrote {}", full_path.display());
        written += 1;
    }

    Ok(written)
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}
