//! Verse pane widget for the current search outcome

use crate::markup;
use crate::search::DisplayState;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Shown when the search box is empty
pub const IDLE_TEXT: &str = "SOLA SCRIPTURA ... ✨";

/// Shown while the typed term has nothing to display yet
pub const PROMPT_TEXT: &str = "Seek a verse to find ... ✨";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Verse pane widget rendering a [`DisplayState`]
pub struct VersePane<'a> {
    display: DisplayState<'a>,
    /// Translation shown when a verse carries none
    default_translation: &'a str,
    theme: &'a Theme,
    spinner_tick: usize,
}

impl<'a> VersePane<'a> {
    /// Create a new verse pane
    #[must_use]
    pub const fn new(
        display: DisplayState<'a>,
        default_translation: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            display,
            default_translation,
            theme,
            spinner_tick: 0,
        }
    }

    /// Set the spinner frame for the loading state
    #[must_use]
    pub const fn spinner(mut self, tick: usize) -> Self {
        self.spinner_tick = tick;
        self
    }

    fn verse_lines(&self, text: &str, reference: String) -> Vec<Line<'static>> {
        let spans: Vec<Span<'static>> = markup::highlight_segments(text)
            .into_iter()
            .map(|segment| {
                let style = if segment.highlighted {
                    self.theme.match_style()
                } else {
                    self.theme.verse_style()
                };
                Span::styled(segment.text, style)
            })
            .collect();

        vec![
            Line::from(spans),
            Line::default(),
            Line::styled(reference, self.theme.reference_style()).alignment(Alignment::Right),
        ]
    }
}

impl Widget for VersePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let lines = match &self.display {
            DisplayState::Idle => vec![Line::styled(IDLE_TEXT, self.theme.placeholder_style())],
            DisplayState::Prompt => {
                vec![Line::styled(PROMPT_TEXT, self.theme.placeholder_style())]
            }
            DisplayState::Loading => {
                let frame = SPINNER[self.spinner_tick % SPINNER.len()];
                vec![Line::from(vec![
                    Span::styled(frame, self.theme.title_style()),
                    Span::styled(" Searching...", self.theme.dimmed_style()),
                ])]
            }
            DisplayState::Verse {
                verse,
                position,
                total,
            } => {
                block = block.title(Span::styled(
                    format!(" {position} / {total} "),
                    self.theme.title_style(),
                ));
                let reference = format!(
                    "{} ({})",
                    verse.reference(),
                    verse.translation_or(self.default_translation)
                );
                self.verse_lines(&verse.text, reference)
            }
            DisplayState::NoResults { term } => vec![Line::styled(
                format!("No verses found for \"{term}\""),
                self.theme.warning_style(),
            )],
            DisplayState::Failed { term } => vec![
                Line::styled(
                    format!("Could not search for \"{term}\""),
                    self.theme.error_style(),
                ),
                Line::styled("Press Enter to try again", self.theme.dimmed_style()),
            ],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
