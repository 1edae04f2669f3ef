//! Full-screen verse search
//!
//! One thread runs the loop: finished fetches are applied, a due debounced
//! search is dispatched, the frame is drawn, then input is polled until the
//! next frame tick or debounce deadline, whichever comes first.

use super::events::{EventResult, poll_and_handle};
use super::state::{AppState, Mode};
use super::theme::Theme;
use super::widgets::{HelpBar, HelpOverlay, SearchBar, StatusBar, VersePane};
use crate::search::{Completion, FetchOutcome, FetchWorker, RequestState, SearchController};
use crate::share::{self, ShareSettings};
use crate::ui::error::Result;
use crate::ui::output::MessageLevel;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Upper bound on how long the loop waits for input
const FRAME_TICK: Duration = Duration::from_millis(100);

/// The interactive search screen
pub struct TuiApp {
    worker: FetchWorker,
    share: ShareSettings,
    theme: Theme,
}

impl TuiApp {
    /// Create the app around a worker that executes its searches
    #[must_use]
    pub fn new(worker: FetchWorker, share: ShareSettings) -> Self {
        Self {
            worker,
            share,
            theme: Theme::default(),
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run the screen until the user quits
    ///
    /// `initial_term` is typed into the search box before the first frame
    /// and searched right away.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or drawn to. The
    /// terminal is restored either way.
    pub fn run(&self, controller: SearchController, initial_term: Option<String>) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, controller, initial_term);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            warn!(error = %e, "terminal cleanup failed");
        }

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        controller: SearchController,
        initial_term: Option<String>,
    ) -> Result<()> {
        let mut state = AppState::new(controller);
        if let Some(term) = initial_term {
            state.set_query(term, Instant::now());
            if let Some(request) = state.controller.search_now() {
                self.worker.dispatch(request);
            }
        }

        while !state.should_exit {
            let now = Instant::now();

            for outcome in self.worker.drain() {
                Self::apply_outcome(&mut state, outcome);
            }
            if let Some(request) = state.controller.poll(now) {
                self.worker.dispatch(request);
            }

            state.cleanup_messages();
            if state.controller.request_state() == RequestState::Loading {
                state.tick();
            }

            terminal.draw(|frame| self.render(frame, &state))?;

            let timeout = state
                .controller
                .next_deadline(now)
                .map_or(FRAME_TICK, |remaining| remaining.min(FRAME_TICK));

            match poll_and_handle(&mut state, timeout)? {
                EventResult::Dispatch(request) => self.worker.dispatch(request),
                EventResult::Copy => Self::copy_current(&mut state),
                EventResult::Share => self.share_current(&mut state),
                EventResult::Exit => break,
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        Ok(())
    }

    /// Hand a finished fetch to the controller
    fn apply_outcome(state: &mut AppState, outcome: FetchOutcome) {
        let failure = outcome.result.as_ref().err().map(ToString::to_string);

        match state.controller.complete(&outcome.ticket, outcome.result) {
            Completion::Failed => {
                let reason = failure.unwrap_or_default();
                state.add_message(MessageLevel::Error, format!("Search failed: {reason}"));
            }
            Completion::Stale => {
                debug!(generation = outcome.ticket.generation(), "ignored stale outcome");
            }
            Completion::Found(_) | Completion::Empty => {}
        }
    }

    fn copy_current(state: &mut AppState) {
        let Some(verse) = state.controller.current() else {
            return;
        };
        let text = share::clipboard_text(verse, &state.controller.options().translation);

        match share::copy_to_clipboard(&text) {
            Ok(()) => state.add_message(MessageLevel::Success, "Copied"),
            Err(e) => {
                warn!(error = %e, "copy failed");
                state.add_message(MessageLevel::Error, e.to_string());
            }
        }
    }

    fn share_current(&self, state: &mut AppState) {
        let Some(verse) = state.controller.current() else {
            return;
        };
        let url = share::share_url(verse, &self.share);

        match share::open_url(&url) {
            Ok(()) => state.add_message(MessageLevel::Info, "Opened share link"),
            Err(e) => {
                warn!(error = %e, "share failed");
                state.add_message(MessageLevel::Error, e.to_string());
            }
        }
    }

    fn render(&self, frame: &mut Frame, state: &AppState) {
        let [search_area, verse_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Verse
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .areas(frame.area());

        let controller = &state.controller;
        let translation = controller.options().translation.as_str();

        frame.render_widget(SearchBar::new(state.query(), &self.theme), search_area);

        let verse_pane = VersePane::new(controller.display_state(), translation, &self.theme)
            .spinner(state.spinner_tick);
        frame.render_widget(verse_pane, verse_area);

        let messages = state.active_messages();
        frame.render_widget(StatusBar::new(&messages, translation, &self.theme), status_area);

        let hints = HelpBar::hints_for(controller.results().len(), controller.current().is_some());
        frame.render_widget(HelpBar::new(&hints, &self.theme), help_area);

        if state.mode == Mode::Help {
            frame.render_widget(HelpOverlay::new(&self.theme), frame.area());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchOptions;
    use crate::source::{SearchQuery, SourceError, VerseSource};
    use crate::verse::VerseMatch;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct NoSource;

    impl VerseSource for NoSource {
        fn find(&self, _query: &SearchQuery) -> crate::source::Result<Vec<VerseMatch>> {
            Ok(Vec::new())
        }
    }

    fn app() -> TuiApp {
        TuiApp::new(FetchWorker::new(Arc::new(NoSource)), ShareSettings::default())
    }

    fn screen(app: &TuiApp, state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| app.render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn searched_state(term: &str) -> (AppState, crate::search::SearchRequest) {
        let mut state = AppState::new(SearchController::new(SearchOptions::default()));
        state.set_query(term, Instant::now());
        let request = state.controller.search_now().unwrap();
        (state, request)
    }

    fn apply(
        state: &mut AppState,
        request: crate::search::SearchRequest,
        result: crate::source::Result<Vec<VerseMatch>>,
    ) {
        TuiApp::apply_outcome(
            state,
            FetchOutcome {
                ticket: request.ticket,
                result,
            },
        );
    }

    #[test]
    fn test_render_idle_screen() {
        let state = AppState::new(SearchController::default());
        let out = screen(&app(), &state);
        assert!(out.contains("Keep your candle lit..."));
        assert!(out.contains("SOLA SCRIPTURA"));
        assert!(out.contains("[NKJV]"));
    }

    #[test]
    fn test_render_verse_with_navigation_hints() {
        let (mut state, request) = searched_state("love");
        let verses = vec![
            VerseMatch::new("Love is patient", 46, 13, 4),
            VerseMatch::new("God is love", 62, 4, 8),
        ];
        apply(&mut state, request, Ok(verses));

        let out = screen(&app(), &state);
        assert!(out.contains("Love is patient"));
        assert!(out.contains("1 Corinthians 13:4 (NKJV)"));
        assert!(out.contains("1 / 2"));
        assert!(out.contains("peek"));
        assert!(out.contains("seek"));
    }

    #[test]
    fn test_failed_outcome_reports_status() {
        let (mut state, request) = searched_state("love");
        apply(&mut state, request, Err(SourceError::Timeout));

        assert_eq!(state.controller.request_state(), RequestState::Failed);
        assert_eq!(state.active_messages().len(), 1);
        assert_eq!(state.active_messages()[0].level, MessageLevel::Error);
    }

    #[test]
    fn test_stale_outcome_is_silent() {
        let (mut state, request) = searched_state("love");
        state.set_query("grace", Instant::now());
        apply(&mut state, request, Err(SourceError::Timeout));

        assert!(state.messages.is_empty());
        assert_eq!(state.controller.request_state(), RequestState::Loading);
    }

    #[test]
    fn test_help_overlay_rendered() {
        let mut state = AppState::new(SearchController::default());
        state.mode = Mode::Help;
        assert!(screen(&app(), &state).contains(" Help "));
    }
}
