//! Search controller
//!
//! Owns the search term, the debounce deadline, the outstanding request
//! ticket, the result set and the displayed index. It performs no I/O: a
//! search produces a [`SearchRequest`] for the caller to execute, and the
//! answer comes back through [`SearchController::complete`].
//!
//! Invariant: whenever the result set is non-empty, `index < results.len()`
//! and the displayed verse is `results[index]`.

use super::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::source::{MAX_LIMIT, SearchQuery, SourceError};
use crate::verse::VerseMatch;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Minimum trimmed term length (in characters) that triggers a search
pub const MIN_TERM_CHARS: usize = 3;

/// Default translation code
pub const DEFAULT_TRANSLATION: &str = "NKJV";

/// Lifecycle of the current fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing requested (or the term was too short)
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// The last request answered (possibly with zero matches)
    Succeeded,
    /// The last request failed
    Failed,
}

/// Identifies one issued request
///
/// A completion is only applied if its ticket is the latest one issued and
/// its term still equals the current trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    term: String,
}

impl FetchTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// A search the caller must execute against a verse source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: FetchTicket,
    pub query: SearchQuery,
}

/// Search settings fixed for the lifetime of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub translation: String,
    pub match_whole: bool,
    pub limit: u32,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            translation: DEFAULT_TRANSLATION.to_string(),
            match_whole: false,
            limit: MAX_LIMIT,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// What a completion did to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results replaced; carries the match count
    Found(usize),
    /// Valid answer with zero matches
    Empty,
    /// Transport failure; results cleared
    Failed,
    /// Superseded by a newer term or request; ignored
    Stale,
}

/// What the view should show right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    /// Empty search box
    Idle,
    /// Something typed but nothing to show yet
    Prompt,
    /// Waiting for the service
    Loading,
    /// A verse, with its 1-based position in the result set
    Verse {
        verse: &'a VerseMatch,
        position: usize,
        total: usize,
    },
    /// The service found nothing
    NoResults { term: &'a str },
    /// The request failed
    Failed { term: &'a str },
}

/// Debounced search over a remote verse source
#[derive(Debug)]
pub struct SearchController {
    options: SearchOptions,
    term: String,
    debouncer: Debouncer,
    results: Vec<VerseMatch>,
    index: usize,
    state: RequestState,
    generation: u64,
    pending: Option<FetchTicket>,
    searched: Option<String>,
}

impl SearchController {
    /// Create an idle controller
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        let debouncer = Debouncer::new(options.debounce);
        Self {
            options,
            term: String::new(),
            debouncer,
            results: Vec::new(),
            index: 0,
            state: RequestState::Idle,
            generation: 0,
            pending: None,
            searched: None,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Current search term, exactly as typed
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn results(&self) -> &[VerseMatch] {
        &self.results
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn request_state(&self) -> RequestState {
        self.state
    }

    /// The displayed verse, if any
    #[must_use]
    pub fn current(&self) -> Option<&VerseMatch> {
        self.results.get(self.index)
    }

    /// Store a new term and restart the debounce delay
    ///
    /// Never searches synchronously; call [`Self::poll`] to find out when the
    /// delay has elapsed.
    pub fn on_input(&mut self, new_term: impl Into<String>, now: Instant) {
        self.term = new_term.into();
        self.debouncer.schedule(now);
        debug!(term = %self.term, "search rescheduled");
    }

    /// Run the debounced search if its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if self.debouncer.fire(now) {
            self.search_current()
        } else {
            None
        }
    }

    /// Time until the pending debounced search is due
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Search the current term immediately, skipping the debounce delay
    ///
    /// Unlike the debounced path this always issues a fresh request for a
    /// valid term, so it doubles as a manual retry.
    pub fn search_now(&mut self) -> Option<SearchRequest> {
        self.debouncer.cancel();
        let term = self.term.clone();
        self.search(&term)
    }

    fn search_current(&mut self) -> Option<SearchRequest> {
        let trimmed = self.term.trim();
        let unchanged = self.searched.as_deref() == Some(trimmed)
            && matches!(self.state, RequestState::Loading | RequestState::Succeeded);
        if unchanged {
            debug!(term = trimmed, "term unchanged, keeping current search");
            return None;
        }
        let term = self.term.clone();
        self.search(&term)
    }

    fn search(&mut self, term: &str) -> Option<SearchRequest> {
        let trimmed = term.trim();
        if trimmed.chars().count() < MIN_TERM_CHARS {
            debug!(term = trimmed, "term too short, not searching");
            self.reset(RequestState::Idle);
            self.pending = None;
            self.searched = None;
            return None;
        }

        self.reset(RequestState::Loading);
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            term: trimmed.to_string(),
        };
        self.pending = Some(ticket.clone());
        self.searched = Some(trimmed.to_string());

        let query = SearchQuery::new(trimmed, self.options.translation.as_str())
            .with_match_whole(self.options.match_whole)
            .with_limit(self.options.limit);
        info!(term = trimmed, generation = self.generation, "searching");

        Some(SearchRequest { ticket, query })
    }

    /// Apply the answer to a previously issued request
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<VerseMatch>, SourceError>,
    ) -> Completion {
        let issued = self.pending.as_ref() == Some(ticket);
        if !issued || ticket.term != self.term.trim() {
            if issued {
                // Nothing is in flight any more; returning to this term must search again
                self.pending = None;
                self.searched = None;
            }
            debug!(
                term = %ticket.term,
                generation = ticket.generation,
                "discarding stale search response"
            );
            return Completion::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(matches) if matches.is_empty() => {
                self.reset(RequestState::Succeeded);
                info!(term = %ticket.term, "no verses found");
                Completion::Empty
            }
            Ok(matches) => {
                let count = matches.len();
                self.results = matches;
                self.index = 0;
                self.state = RequestState::Succeeded;
                info!(term = %ticket.term, count, "verses found");
                Completion::Found(count)
            }
            Err(error) => {
                warn!(term = %ticket.term, %error, "verse search failed");
                self.reset(RequestState::Failed);
                Completion::Failed
            }
        }
    }

    /// Show the next verse, wrapping to the first
    ///
    /// Returns `false` (and does nothing) unless there are at least two
    /// results.
    pub fn next(&mut self) -> bool {
        let len = self.results.len();
        if len < 2 {
            return false;
        }
        self.index = (self.index + 1) % len;
        true
    }

    /// Show the previous verse, wrapping to the last
    pub fn previous(&mut self) -> bool {
        let len = self.results.len();
        if len < 2 {
            return false;
        }
        self.index = (self.index + len - 1) % len;
        true
    }

    /// Derive what the view should render
    #[must_use]
    pub fn display_state(&self) -> DisplayState<'_> {
        let searched = self.searched.as_deref().unwrap_or("");
        match self.state {
            RequestState::Loading => DisplayState::Loading,
            RequestState::Succeeded => match self.current() {
                Some(verse) => DisplayState::Verse {
                    verse,
                    position: self.index + 1,
                    total: self.results.len(),
                },
                None => DisplayState::NoResults { term: searched },
            },
            RequestState::Failed => DisplayState::Failed { term: searched },
            RequestState::Idle if self.term.trim().is_empty() => DisplayState::Idle,
            RequestState::Idle => DisplayState::Prompt,
        }
    }

    fn reset(&mut self, state: RequestState) {
        self.results.clear();
        self.index = 0;
        self.state = state;
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    fn verses(n: u32) -> Vec<VerseMatch> {
        (1..=n)
            .map(|i| VerseMatch::new(format!("verse <mark>{i}</mark>"), 43, 3, i))
            .collect()
    }

    /// Type `term` at `now` and let the debounce delay elapse
    fn type_and_wait(
        controller: &mut SearchController,
        term: &str,
        now: Instant,
    ) -> Option<SearchRequest> {
        controller.on_input(term, now);
        controller.poll(now + DELAY)
    }

    fn loaded(n: u32) -> SearchController {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "love", Instant::now()).unwrap();
        controller.complete(&request.ticket, Ok(verses(n)));
        controller
    }

    #[test]
    fn test_on_input_does_not_search_synchronously() {
        let mut controller = SearchController::default();
        let now = Instant::now();
        controller.on_input("love", now);

        assert_eq!(controller.term(), "love");
        assert_eq!(controller.request_state(), RequestState::Idle);
        assert!(controller.poll(now).is_none());
        assert_eq!(controller.next_deadline(now), Some(DELAY));
    }

    #[test]
    fn test_term_stored_verbatim() {
        let mut controller = SearchController::default();
        controller.on_input("  love ", Instant::now());
        assert_eq!(controller.term(), "  love ");
    }

    #[test]
    fn test_search_request_for_valid_term() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "  love ", Instant::now()).unwrap();

        assert_eq!(request.query.term, "love");
        assert_eq!(request.query.translation, "NKJV");
        assert!(!request.query.match_whole);
        assert_eq!(request.query.limit, 128);
        assert_eq!(request.ticket.term(), "love");
        assert_eq!(controller.request_state(), RequestState::Loading);
        assert_eq!(controller.display_state(), DisplayState::Loading);
    }

    #[test]
    fn test_short_terms_never_search() {
        for term in ["", "l", "lo", "  lo  ", "\t\n", "ab "] {
            let mut controller = SearchController::default();
            assert!(type_and_wait(&mut controller, term, Instant::now()).is_none());
            assert_eq!(controller.request_state(), RequestState::Idle);
            assert!(controller.results().is_empty());
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut controller = SearchController::default();
        // two characters, four bytes
        assert!(type_and_wait(&mut controller, "éé", Instant::now()).is_none());
        assert!(type_and_wait(&mut controller, "éèê", Instant::now()).is_some());
    }

    #[test]
    fn test_short_term_display_states() {
        let mut controller = SearchController::default();
        type_and_wait(&mut controller, "lo", Instant::now());
        assert_eq!(controller.display_state(), DisplayState::Prompt);

        type_and_wait(&mut controller, "", Instant::now());
        assert_eq!(controller.display_state(), DisplayState::Idle);
    }

    #[test]
    fn test_short_term_clears_previous_results() {
        let mut controller = loaded(3);
        assert!(type_and_wait(&mut controller, "lo", Instant::now()).is_none());
        assert!(controller.results().is_empty());
        assert!(controller.current().is_none());
        assert_eq!(controller.display_state(), DisplayState::Prompt);
    }

    #[test]
    fn test_debounce_coalesces_keystrokes() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let mut requests = Vec::new();

        for (i, term) in ["l", "lo", "lov", "love"].iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            controller.on_input(*term, now);
            requests.extend(controller.poll(now));
        }
        requests.extend(controller.poll(start + Duration::from_millis(799)));
        assert!(requests.is_empty());

        requests.extend(controller.poll(start + Duration::from_millis(800)));
        requests.extend(controller.poll(start + Duration::from_secs(5)));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.term, "love");
    }

    #[test]
    fn test_successful_response_resets_index() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "love", Instant::now()).unwrap();
        let matches = verses(3);

        let completion = controller.complete(&request.ticket, Ok(matches.clone()));

        assert_eq!(completion, Completion::Found(3));
        assert_eq!(controller.results().len(), 3);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.current(), Some(&matches[0]));
        assert_eq!(
            controller.display_state(),
            DisplayState::Verse {
                verse: &matches[0],
                position: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_new_results_replace_old_and_reset_index() {
        let mut controller = loaded(4);
        controller.next();
        controller.next();
        assert_eq!(controller.current_index(), 2);

        let request = type_and_wait(&mut controller, "grace", Instant::now()).unwrap();
        assert!(controller.results().is_empty());
        controller.complete(&request.ticket, Ok(verses(2)));
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.results().len(), 2);
    }

    #[test]
    fn test_empty_response() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "xyzzyx", Instant::now()).unwrap();

        assert_eq!(controller.complete(&request.ticket, Ok(Vec::new())), Completion::Empty);
        assert_eq!(controller.request_state(), RequestState::Succeeded);
        assert!(controller.results().is_empty());
        assert_eq!(
            controller.display_state(),
            DisplayState::NoResults { term: "xyzzyx" }
        );
    }

    #[test]
    fn test_transport_failure() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "love", Instant::now()).unwrap();

        let completion = controller.complete(&request.ticket, Err(SourceError::Timeout));

        assert_eq!(completion, Completion::Failed);
        assert_eq!(controller.request_state(), RequestState::Failed);
        assert!(controller.results().is_empty());
        assert!(controller.current().is_none());
        assert_eq!(controller.display_state(), DisplayState::Failed { term: "love" });
    }

    #[test]
    fn test_late_response_for_old_term_is_discarded() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let old = type_and_wait(&mut controller, "love", start).unwrap();
        let new = type_and_wait(&mut controller, "grace", start + Duration::from_secs(1)).unwrap();

        controller.complete(&new.ticket, Ok(verses(2)));
        assert_eq!(controller.complete(&old.ticket, Ok(verses(5))), Completion::Stale);
        assert_eq!(controller.results().len(), 2);
    }

    #[test]
    fn test_response_discarded_once_term_changes() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let request = type_and_wait(&mut controller, "love", start).unwrap();

        // typed more, debounce still pending
        controller.on_input("loved", start + Duration::from_secs(1));

        assert_eq!(controller.complete(&request.ticket, Ok(verses(3))), Completion::Stale);
        assert!(controller.results().is_empty());
        assert_eq!(controller.request_state(), RequestState::Loading);
    }

    #[test]
    fn test_response_applies_when_term_returns_to_searched_value() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let request = type_and_wait(&mut controller, "love", start).unwrap();

        controller.on_input("loved", start + Duration::from_millis(600));
        controller.on_input("love", start + Duration::from_millis(700));
        assert!(controller.poll(start + Duration::from_secs(2)).is_none());

        assert_eq!(controller.complete(&request.ticket, Ok(verses(3))), Completion::Found(3));
    }

    #[test]
    fn test_returning_to_term_after_stale_response_searches_again() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let request = type_and_wait(&mut controller, "love", start).unwrap();

        controller.on_input("loved", start + Duration::from_millis(600));
        assert_eq!(controller.complete(&request.ticket, Ok(verses(3))), Completion::Stale);

        controller.on_input("love", start + Duration::from_millis(800));
        let again = controller
            .poll(start + Duration::from_millis(1300))
            .expect("search for the restored term");
        assert_eq!(again.query.term, "love");
        assert_ne!(again.ticket, request.ticket);

        assert_eq!(controller.complete(&again.ticket, Ok(verses(2))), Completion::Found(2));
        assert_eq!(controller.request_state(), RequestState::Succeeded);
    }

    #[test]
    fn test_duplicate_completion_is_stale() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "love", Instant::now()).unwrap();
        controller.complete(&request.ticket, Ok(verses(3)));
        controller.next();

        assert_eq!(controller.complete(&request.ticket, Ok(verses(1))), Completion::Stale);
        assert_eq!(controller.results().len(), 3);
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_response_after_short_term_is_stale() {
        let mut controller = SearchController::default();
        let start = Instant::now();
        let request = type_and_wait(&mut controller, "love", start).unwrap();
        type_and_wait(&mut controller, "lo", start + Duration::from_secs(1));

        assert_eq!(controller.complete(&request.ticket, Ok(verses(3))), Completion::Stale);
        assert_eq!(controller.request_state(), RequestState::Idle);
    }

    #[test]
    fn test_whitespace_only_change_keeps_results() {
        let mut controller = loaded(3);
        controller.next();
        assert!(type_and_wait(&mut controller, "love ", Instant::now()).is_none());
        assert_eq!(controller.results().len(), 3);
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_retry_after_failure_by_retyping() {
        let mut controller = SearchController::default();
        let request = type_and_wait(&mut controller, "love", Instant::now()).unwrap();
        controller.complete(&request.ticket, Err(SourceError::Status(502)));

        let retry = type_and_wait(&mut controller, "love", Instant::now()).unwrap();
        assert!(retry.ticket.generation() > request.ticket.generation());
    }

    #[test]
    fn test_search_now_skips_debounce() {
        let mut controller = loaded(3);
        let request = controller.search_now().unwrap();
        assert_eq!(request.query.term, "love");
        assert_eq!(controller.request_state(), RequestState::Loading);
        assert_eq!(controller.next_deadline(Instant::now()), None);
    }

    #[test]
    fn test_next_previous_wrap() {
        let mut controller = loaded(3);
        assert!(controller.previous());
        assert_eq!(controller.current_index(), 2);
        assert!(controller.next());
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_next_then_previous_is_identity() {
        for n in 2..=6 {
            let mut controller = loaded(n);
            for _ in 0..n {
                let before = controller.current_index();
                controller.next();
                controller.previous();
                assert_eq!(controller.current_index(), before);
                controller.next();
            }
        }
    }

    #[test]
    fn test_n_nexts_return_to_start() {
        for n in 2..=7 {
            let mut controller = loaded(n);
            controller.next();
            let start = controller.current_index();
            for _ in 0..n {
                controller.next();
            }
            assert_eq!(controller.current_index(), start);
        }
    }

    #[test]
    fn test_navigation_requires_two_results() {
        let mut controller = loaded(1);
        assert!(!controller.next());
        assert!(!controller.previous());
        assert_eq!(controller.current_index(), 0);

        let mut empty = SearchController::default();
        assert!(!empty.next());
        assert!(!empty.previous());
    }

    #[test]
    fn test_displayed_verse_tracks_index() {
        let mut controller = loaded(3);
        controller.next();
        match controller.display_state() {
            DisplayState::Verse { verse, position, total } => {
                assert_eq!(verse, &controller.results()[1]);
                assert_eq!(position, 2);
                assert_eq!(total, 3);
            }
            other => panic!("expected verse, got {other:?}"),
        }
    }

    #[test]
    fn test_options_flow_into_query() {
        let options = SearchOptions {
            translation: "KJV".to_string(),
            match_whole: true,
            limit: 16,
            debounce: Duration::from_millis(50),
        };
        let mut controller = SearchController::new(options);
        let now = Instant::now();
        controller.on_input("faith", now);
        let request = controller.poll(now + Duration::from_millis(50)).unwrap();

        assert_eq!(request.query.translation, "KJV");
        assert!(request.query.match_whole);
        assert_eq!(request.query.limit, 16);
    }
}
