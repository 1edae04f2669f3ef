//! Search bar widget for the search term

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown in the empty search box
pub const PLACEHOLDER: &str = "Keep your candle lit...";

/// Search bar widget that displays the term with a trailing cursor
pub struct SearchBar<'a> {
    /// Current search term
    query: &'a str,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, theme: &'a Theme) -> Self {
        Self { query, theme }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(Span::styled(" I-QUOTE ", self.theme.title_style()));

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let spans = if self.query.is_empty() {
            vec![
                cursor,
                Span::styled(PLACEHOLDER, self.theme.placeholder_style()),
            ]
        } else {
            vec![Span::raw(self.query), cursor]
        };

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
