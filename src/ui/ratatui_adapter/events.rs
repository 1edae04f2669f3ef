//! Event handling for the ratatui TUI
//!
//! Maps keyboard events to state changes. Anything with a side effect outside
//! the process (network, clipboard, browser) is returned as an
//! [`EventResult`] for the app loop to carry out.

use super::state::{AppState, Mode};
use crate::search::SearchRequest;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Execute this search now
    Dispatch(SearchRequest),
    /// Copy the displayed verse to the clipboard
    Copy,
    /// Open a share link for the displayed verse
    Share,
    /// Exit the app
    Exit,
    /// No action taken
    Ignored,
}

/// Handle events in normal mode
fn handle_normal_mode(state: &mut AppState, key: KeyEvent, now: Instant) -> EventResult {
    let changed = |moved: bool| {
        if moved {
            EventResult::Continue
        } else {
            EventResult::Ignored
        }
    };

    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            state.exit();
            EventResult::Exit
        }

        // Help overlay
        (KeyCode::F(1), _) => {
            state.mode = Mode::Help;
            EventResult::Continue
        }

        // Search immediately
        (KeyCode::Enter, _) => state
            .controller
            .search_now()
            .map_or(EventResult::Ignored, EventResult::Dispatch),

        // Verse navigation
        (KeyCode::Right | KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
            changed(state.controller.next())
        }
        (KeyCode::Left | KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
            changed(state.controller.previous())
        }

        // Copy / share
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => {
            if state.controller.current().is_some() {
                EventResult::Copy
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            if state.controller.current().is_some() {
                EventResult::Share
            } else {
                EventResult::Ignored
            }
        }

        // Query editing
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => changed(state.query_clear(now)),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => changed(state.query_delete_word(now)),
        (KeyCode::Backspace, _) => changed(state.query_backspace(now)),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c, now);
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle events in help mode
fn handle_help_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    // Any key closes help; Ctrl+C still quits
    state.mode = Mode::Normal;
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        state.exit();
        EventResult::Exit
    } else {
        EventResult::Continue
    }
}

/// Handle a single key event
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> EventResult {
    // Windows reports releases too; only presses edit the query
    if key.kind == KeyEventKind::Release {
        return EventResult::Ignored;
    }
    match state.mode {
        Mode::Normal => handle_normal_mode(state, key, now),
        Mode::Help => handle_help_mode(state, key),
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(state, key, Instant::now()),
        Event::Paste(text) => {
            let query = format!("{}{}", state.query(), text.replace(['\r', '\n'], " "));
            state.set_query(query, Instant::now());
            EventResult::Continue
        }
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchController, SearchOptions};
    use crate::verse::VerseMatch;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn make_state() -> AppState {
        AppState::new(SearchController::new(SearchOptions::default()))
    }

    fn loaded_state(n: u32) -> AppState {
        let mut state = make_state();
        state.set_query("love", Instant::now());
        let request = state.controller.search_now().unwrap();
        let verses = (1..=n).map(|i| VerseMatch::new("love", 62, 4, i)).collect();
        state.controller.complete(&request.ticket, Ok(verses));
        state
    }

    #[test]
    fn test_typing_edits_query() {
        let mut state = make_state();
        let now = Instant::now();
        for c in "Love".chars() {
            let code = KeyCode::Char(c);
            let modifiers = if c.is_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            assert_eq!(
                handle_key(&mut state, KeyEvent::new(code, modifiers), now),
                EventResult::Continue
            );
        }
        assert_eq!(state.query(), "Love");

        assert_eq!(handle_key(&mut state, ctrl('w'), now), EventResult::Continue);
        assert_eq!(state.query(), "");
        assert_eq!(handle_key(&mut state, key(KeyCode::Backspace), now), EventResult::Ignored);
    }

    #[test]
    fn test_enter_dispatches_valid_term() {
        let mut state = make_state();
        let now = Instant::now();
        state.set_query("grace", now);

        match handle_key(&mut state, key(KeyCode::Enter), now) {
            EventResult::Dispatch(request) => assert_eq!(request.query.term, "grace"),
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_ignores_short_term() {
        let mut state = make_state();
        let now = Instant::now();
        state.set_query("lo", now);
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter), now), EventResult::Ignored);
    }

    #[test]
    fn test_arrow_navigation() {
        let mut state = loaded_state(3);
        let now = Instant::now();

        assert_eq!(handle_key(&mut state, key(KeyCode::Right), now), EventResult::Continue);
        assert_eq!(state.controller.current_index(), 1);
        assert_eq!(handle_key(&mut state, key(KeyCode::Left), now), EventResult::Continue);
        assert_eq!(handle_key(&mut state, key(KeyCode::Left), now), EventResult::Continue);
        assert_eq!(state.controller.current_index(), 2);
        assert_eq!(handle_key(&mut state, ctrl('n'), now), EventResult::Continue);
        assert_eq!(state.controller.current_index(), 0);
    }

    #[test]
    fn test_navigation_ignored_with_single_result() {
        let mut state = loaded_state(1);
        let now = Instant::now();
        assert_eq!(handle_key(&mut state, key(KeyCode::Right), now), EventResult::Ignored);
        assert_eq!(handle_key(&mut state, key(KeyCode::Up), now), EventResult::Ignored);
    }

    #[test]
    fn test_copy_and_share_need_a_verse() {
        let now = Instant::now();
        let mut empty = make_state();
        assert_eq!(handle_key(&mut empty, ctrl('y'), now), EventResult::Ignored);
        assert_eq!(handle_key(&mut empty, ctrl('s'), now), EventResult::Ignored);

        let mut state = loaded_state(2);
        assert_eq!(handle_key(&mut state, ctrl('y'), now), EventResult::Copy);
        assert_eq!(handle_key(&mut state, ctrl('s'), now), EventResult::Share);
    }

    #[test]
    fn test_help_toggle() {
        let mut state = make_state();
        let now = Instant::now();

        handle_key(&mut state, key(KeyCode::F(1)), now);
        assert_eq!(state.mode, Mode::Help);

        // the key that closes help is not typed into the query
        handle_key(&mut state, key(KeyCode::Char('x')), now);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_exit() {
        let mut state = make_state();
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Esc), Instant::now()),
            EventResult::Exit
        );
        assert!(state.should_exit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut state = make_state();
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key(&mut state, release, Instant::now()), EventResult::Ignored);
        assert_eq!(state.query(), "");
    }
}
