//! Verse source abstraction

use super::error::Result;
use crate::verse::VerseMatch;

/// Upper bound on results per request accepted by the service
pub const MAX_LIMIT: u32 = 128;

/// Parameters for one verse search
///
/// Matching is always case-insensitive and only the first page is ever
/// requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed search term
    pub term: String,
    /// Translation code, e.g. `NKJV`
    pub translation: String,
    /// Match whole words only
    pub match_whole: bool,
    /// Maximum number of results (1..=128)
    pub limit: u32,
}

impl SearchQuery {
    /// Create a query with default options (substring match, 128 results)
    #[must_use]
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
            match_whole: false,
            limit: MAX_LIMIT,
        }
    }

    /// Set whole-word matching
    #[must_use]
    pub const fn with_match_whole(mut self, match_whole: bool) -> Self {
        self.match_whole = match_whole;
        self
    }

    /// Set the result limit, clamped to `1..=MAX_LIMIT`
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// Page requested from the service
    #[must_use]
    pub const fn page(&self) -> u32 {
        1
    }
}

/// Trait for verse search backends
///
/// Implementations are called from worker threads, so they must be
/// shareable. A call blocks until the backend answers or gives up.
pub trait VerseSource: Send + Sync {
    /// Find verses matching the query
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached, times out, or
    /// answers with something that is not a verse list.
    fn find(&self, query: &SearchQuery) -> Result<Vec<VerseMatch>>;
}
