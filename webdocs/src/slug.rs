//! Anchor slugs for section titles
//!
//! The same normalization is used when building search result paths, when
//! listing a category's anchors and when a navigation path is resolved back
//! to a section. Anchors that would collide inside one category are
//! disambiguated by [`AnchorSet`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Anchor used for titles that contain no `[a-z0-9]` characters at all
pub const EMPTY_SLUG_ANCHOR: &str = "section";

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Convert a title to a URL-safe slug
///
/// Lowercases the title, collapses every run of characters outside
/// `[a-z0-9]` into a single `-` and trims leading and trailing `-`.
///
/// # Examples
/// * `"Closures"` -> `"closures"`
/// * `"Arrow Functions & this"` -> `"arrow-functions-this"`
/// * `"  CSS: Grid  "` -> `"css-grid"`
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Assigns unique anchors to the sections of one category
///
/// Sections must be pushed in stored order. The first section with a given
/// slug keeps it; later ones get the first free `-1`, `-2`, ... suffix.
#[derive(Debug, Default)]
pub struct AnchorSet {
    taken: HashSet<String>,
}

impl AnchorSet {
    /// Create an empty anchor set for a new category
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the anchor for the next section title
    pub fn assign(&mut self, title: &str) -> String {
        let mut base = slugify(title);
        if base.is_empty() {
            base = EMPTY_SLUG_ANCHOR.to_string();
        }

        if self.taken.insert(base.clone()) {
            return base;
        }

        let mut suffix = 1usize;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Compute anchors for an ordered list of titles
///
/// # Parameters
/// * `titles` - Section titles in stored order
///
/// # Returns
/// * `Vec<String>` - One anchor per title, same order
pub fn anchors_for<'a, I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = AnchorSet::new();
    titles.into_iter().map(|t| set.assign(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Closures"), "closures");
        assert_eq!(slugify("Arrow Functions & this"), "arrow-functions-this");
        assert_eq!(slugify("  CSS: Grid  "), "css-grid");
        assert_eq!(slugify("ES2015+ Modules"), "es2015-modules");
    }

    #[test]
    fn test_slugify_non_ascii_becomes_separator() {
        assert_eq!(slugify("Fermetures lexicales é"), "fermetures-lexicales");
        assert_eq!(slugify("Les bases du DOM"), "les-bases-du-dom");
        assert_eq!(slugify("Déclaration"), "d-claration");
    }

    #[test]
    fn test_slugify_only_separators() {
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Promises & async/await";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(title), "promises-async-await");
    }

    #[test]
    fn test_anchor_set_disambiguates_collisions() {
        let anchors = anchors_for(["Overview", "overview!", "Overview", "Overview 1"]);
        assert_eq!(anchors, vec!["overview", "overview-1", "overview-2", "overview-1-1"]);
    }

    #[test]
    fn test_anchor_set_empty_slug() {
        let anchors = anchors_for(["???", "!!!"]);
        assert_eq!(anchors, vec!["section", "section-1"]);
    }
}
