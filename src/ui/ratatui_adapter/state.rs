//! Application state for the ratatui TUI
//!
//! Wraps the [`SearchController`] with the screen-only state: UI mode,
//! status messages, spinner frame and the exit flag. All edits to the search
//! term go through here so the controller always sees every keystroke.

use crate::search::SearchController;
use crate::ui::output::MessageLevel;
use std::time::{Duration, Instant};

/// Current mode of the TUI application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing and paging through verses
    #[default]
    Normal,
    /// Help overlay is visible
    Help,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// Message level (success, error, warning, info)
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the message was created
    pub created_at: Instant,
}

impl StatusMessage {
    /// Create a new status message
    #[must_use]
    pub fn new(level: MessageLevel, text: String) -> Self {
        Self {
            level,
            text,
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Application state for the search screen
#[derive(Debug)]
pub struct AppState {
    /// Search term, results and navigation
    pub controller: SearchController,
    /// Current UI mode
    pub mode: Mode,
    /// Status messages
    pub messages: Vec<StatusMessage>,
    /// Message TTL for auto-expiry
    pub message_ttl: Duration,
    /// Whether the app should exit
    pub should_exit: bool,
    /// Frame counter for the loading spinner
    pub spinner_tick: usize,
}

impl AppState {
    /// Create new application state around a controller
    #[must_use]
    pub fn new(controller: SearchController) -> Self {
        Self {
            controller,
            mode: Mode::Normal,
            messages: Vec::new(),
            message_ttl: Duration::from_secs(3),
            should_exit: false,
            spinner_tick: 0,
        }
    }

    /// Current search term
    #[must_use]
    pub fn query(&self) -> &str {
        self.controller.term()
    }

    fn edit_query(&mut self, now: Instant, edit: impl FnOnce(&mut String)) {
        let mut query = self.controller.term().to_string();
        edit(&mut query);
        self.controller.on_input(query, now);
    }

    /// Replace the whole query
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.controller.on_input(query, now);
    }

    /// Append a character to the query
    pub fn query_push(&mut self, c: char, now: Instant) {
        self.edit_query(now, |q| q.push(c));
    }

    /// Remove the last character; returns `false` if the query was empty
    pub fn query_backspace(&mut self, now: Instant) -> bool {
        if self.query().is_empty() {
            return false;
        }
        self.edit_query(now, |q| {
            q.pop();
        });
        true
    }

    /// Delete the last word (and any whitespace after it)
    pub fn query_delete_word(&mut self, now: Instant) -> bool {
        if self.query().is_empty() {
            return false;
        }
        self.edit_query(now, |q| {
            let trimmed_len = q.trim_end().len();
            let cut = q[..trimmed_len].rfind(' ').map_or(0, |i| i + 1);
            q.truncate(cut);
        });
        true
    }

    /// Clear the query
    pub fn query_clear(&mut self, now: Instant) -> bool {
        if self.query().is_empty() {
            return false;
        }
        self.edit_query(now, String::clear);
        true
    }

    /// Add a status message
    pub fn add_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text.into()));
    }

    /// Messages that have not expired yet
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    /// Drop expired messages
    pub fn cleanup_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }

    /// Advance the spinner by one frame
    pub const fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// Request exit
    pub const fn exit(&mut self) {
        self.should_exit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> AppState {
        AppState::new(SearchController::default())
    }

    #[test]
    fn test_query_editing() {
        let mut state = make_state();
        let now = Instant::now();

        state.query_push('l', now);
        state.query_push('o', now);
        state.query_push('v', now);
        state.query_push('e', now);
        assert_eq!(state.query(), "love");

        assert!(state.query_backspace(now));
        assert_eq!(state.query(), "lov");

        assert!(state.query_clear(now));
        assert_eq!(state.query(), "");
        assert!(!state.query_backspace(now));
        assert!(!state.query_clear(now));
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut state = make_state();
        let now = Instant::now();
        state.set_query("grâce", now);
        state.query_backspace(now);
        state.query_backspace(now);
        assert_eq!(state.query(), "grâ");
        state.query_backspace(now);
        assert_eq!(state.query(), "gr");
    }

    #[test]
    fn test_delete_word() {
        let mut state = make_state();
        let now = Instant::now();
        state.set_query("love one another", now);

        assert!(state.query_delete_word(now));
        assert_eq!(state.query(), "love one ");
        assert!(state.query_delete_word(now));
        assert_eq!(state.query(), "love ");
        assert!(state.query_delete_word(now));
        assert_eq!(state.query(), "");
        assert!(!state.query_delete_word(now));
    }

    #[test]
    fn test_edits_reschedule_search() {
        let mut state = make_state();
        let now = Instant::now();
        state.query_push('x', now);
        assert!(state.controller.next_deadline(now).is_some());
    }

    #[test]
    fn test_messages_expire() {
        let mut state = make_state();
        state.message_ttl = Duration::from_millis(20);
        state.add_message(MessageLevel::Success, "Copied");
        assert_eq!(state.active_messages().len(), 1);

        std::thread::sleep(Duration::from_millis(40));
        assert!(state.active_messages().is_empty());
        state.cleanup_messages();
        assert!(state.messages.is_empty());
    }
}
