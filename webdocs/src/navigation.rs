//! Navigation paths between search results and documentation views
//!
//! A result points at `/docs/{category}#{anchor}` and also carries the
//! section index, so a view can scroll by anchor or by position.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::library::{DocumentSet, ResolvedCategory};

/// Prefix shared by every documentation path
pub const DOCS_PREFIX: &str = "/docs/";

/// Errors that can occur when resolving a navigation path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Not a documentation path: '{0}' (expected /docs/<category>[#anchor])")]
    NotADocsPath(String),

    #[error("Documentation path has no category: '{0}'")]
    MissingCategory(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Where a selected result should take the documentation view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub category: String,
    /// Element identifier to scroll to
    pub anchor: Option<String>,
    /// Out-of-band "scroll to section N" signal
    pub section_index: Option<usize>,
}

/// A navigation target matched against a document set
#[derive(Debug, Clone)]
pub struct Located<'a> {
    pub category: ResolvedCategory<'a>,
    /// Index of the section to scroll to, if any was found
    pub section: Option<usize>,
}

impl NavigationTarget {
    /// Build the path for a section anchor
    pub fn path_for(category: &str, anchor: &str) -> String {
        format!("{}{}#{}", DOCS_PREFIX, category, anchor)
    }

    /// Parse a documentation path
    ///
    /// Accepted forms:
    /// * `/docs/{category}`
    /// * `/docs/{category}#{anchor}`
    /// * `/docs/{category}/{anchor}`
    pub fn parse(path: &str) -> Result<Self, NavigationError> {
        let rest = path
            .trim()
            .strip_prefix(DOCS_PREFIX)
            .ok_or_else(|| NavigationError::NotADocsPath(path.to_string()))?;

        let (category, anchor) = match rest.split_once('#') {
            Some((category, anchor)) => (category.trim_end_matches('/'), Some(anchor)),
            None => match rest.split_once('/') {
                Some((category, anchor)) => (category, Some(anchor.trim_end_matches('/'))),
                None => (rest, None),
            },
        };

        if category.is_empty() {
            return Err(NavigationError::MissingCategory(path.to_string()));
        }

        Ok(Self {
            category: category.to_string(),
            anchor: anchor.filter(|a| !a.is_empty()).map(str::to_string),
            section_index: None,
        })
    }

    /// Attach a section index signal
    pub fn with_section_index(mut self, index: usize) -> Self {
        self.section_index = Some(index);
        self
    }

    /// The path without the index signal
    pub fn path(&self) -> String {
        match &self.anchor {
            Some(anchor) => Self::path_for(&self.category, anchor),
            None => format!("{}{}", DOCS_PREFIX, self.category),
        }
    }

    /// Find the category and section this target points at
    ///
    /// The anchor wins when it matches a section; otherwise the index
    /// signal is used if it is in range. A target that matches neither
    /// lands on the category itself.
    pub fn locate<'a>(&self, set: &DocumentSet<'a>) -> Result<Located<'a>, NavigationError> {
        let category = set
            .category(&self.category)
            .ok_or_else(|| NavigationError::UnknownCategory(self.category.clone()))?;

        let by_anchor = self.anchor.as_deref().and_then(|anchor| {
            category
                .sections
                .iter()
                .find(|s| s.anchor == anchor)
                .map(|s| s.index)
        });

        let section = by_anchor.or_else(|| {
            self.section_index
                .filter(|index| *index < category.sections.len())
        });

        if section.is_none() && (self.anchor.is_some() || self.section_index.is_some()) {
            log::warn!("No section matches {}; showing category", self);
        }

        Ok(Located { category, section })
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())?;
        if let Some(index) = self.section_index {
            write!(f, " (section {})", index)?;
        }
        Ok(())
    }
}
