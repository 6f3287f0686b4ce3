//! Debounced query pipeline for the search view
//!
//! The controller never spawns timers. The event loop feeds it keystrokes
//! with [`QueryController::input`] and calls [`QueryController::poll`] when
//! the deadline from [`QueryController::pending_deadline`] has passed. A new
//! keystroke replaces the pending scan, so only the settled query is ever
//! scanned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::navigation::NavigationTarget;
use crate::search::{SearchEngine, SearchResult};

/// Default quiescence window after the last keystroke
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the search view should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No query typed yet (or only whitespace)
    Idle,
    /// A query was scanned and nothing matched
    NoResults,
    /// A query was scanned and at least one section matched
    HasResults,
}

/// A scan waiting for input to settle
#[derive(Debug, Clone)]
struct PendingScan {
    query: String,
    deadline: Instant,
}

/// Owns the query text and the results shown for it
#[derive(Debug)]
pub struct QueryController {
    engine: Arc<SearchEngine>,
    language: String,
    debounce: Duration,
    current_query: String,
    current_results: Vec<SearchResult>,
    /// Query the current results were computed for
    scanned_query: Option<String>,
    pending: Option<PendingScan>,
}

impl QueryController {
    /// Create a controller with an empty query
    pub fn new(engine: Arc<SearchEngine>, language: impl Into<String>) -> Self {
        Self {
            engine,
            language: language.into(),
            debounce: DEFAULT_DEBOUNCE,
            current_query: String::new(),
            current_results: Vec::new(),
            scanned_query: None,
            pending: None,
        }
    }

    /// Set the debounce window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start from a query supplied with the page (the `q` parameter)
    ///
    /// The initial query is scanned at once, without waiting for input to
    /// settle.
    pub fn with_initial_query(mut self, query: &str) -> Self {
        self.current_query = query.to_string();
        self.pending = None;
        if is_blank(query) {
            self.clear_results();
        } else {
            self.run_scan(query.to_string());
        }
        self
    }

    /// Record a keystroke: the query text changed at `now`
    ///
    /// The query is updated immediately. Any pending scan is cancelled and a
    /// new one is scheduled for `now + debounce`. A blank query cancels the
    /// pending scan and returns to [`DisplayState::Idle`] straight away.
    pub fn input(&mut self, query: &str, now: Instant) {
        self.current_query = query.to_string();

        if let Some(cancelled) = self.pending.take() {
            log::trace!("Cancelled pending scan for '{}'", cancelled.query);
        }

        if is_blank(query) {
            self.clear_results();
            return;
        }

        self.pending = Some(PendingScan {
            query: query.to_string(),
            deadline: now + self.debounce,
        });
    }

    /// Change the display language; the current query is scanned again
    /// once the debounce window has passed
    pub fn set_language(&mut self, language: impl Into<String>, now: Instant) {
        self.language = language.into();
        let query = self.current_query.clone();
        self.input(&query, now);
    }

    /// Run the pending scan if its deadline has passed
    ///
    /// # Returns
    /// * `true` - A scan ran and the results were replaced
    /// * `false` - Nothing was pending or the deadline is still ahead
    pub fn poll(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {}
            _ => return false,
        }

        match self.pending.take() {
            Some(pending) => {
                self.run_scan(pending.query);
                true
            }
            None => false,
        }
    }

    /// When the next scan is due, if one is pending
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// The query text as typed
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    /// Results of the last completed scan
    pub fn current_results(&self) -> &[SearchResult] {
        &self.current_results
    }

    /// The active display language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Derived view state
    ///
    /// While a scan is pending the state reflects the last completed scan.
    pub fn display_state(&self) -> DisplayState {
        match &self.scanned_query {
            None => DisplayState::Idle,
            Some(_) if self.current_results.is_empty() => DisplayState::NoResults,
            Some(_) => DisplayState::HasResults,
        }
    }

    /// Query the current results belong to
    pub fn scanned_query(&self) -> Option<&str> {
        self.scanned_query.as_deref()
    }

    /// Navigation target for the result at `index`
    pub fn select(&self, index: usize) -> Option<NavigationTarget> {
        let result = self.current_results.get(index)?;
        let target = result.target();
        log::debug!("Selected result {} -> {}", index, target);
        Some(target)
    }

    fn run_scan(&mut self, query: String) {
        self.current_results = self.engine.search(&query, &self.language);
        log::debug!(
            "Scan for '{}' produced {} results",
            query,
            self.current_results.len()
        );
        self.scanned_query = Some(query);
    }

    fn clear_results(&mut self) {
        self.current_results.clear();
        self.scanned_query = None;
    }
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
