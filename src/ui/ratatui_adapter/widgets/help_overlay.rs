//! Help overlay widget for displaying full keybind reference

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Help overlay widget that displays a centered help screen
pub struct HelpOverlay<'a> {
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    /// Create a new help overlay
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered area for the overlay
    fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
        let [_, middle, _] = Layout::vertical([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .areas(area);

        let [_, center, _] = Layout::horizontal([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .areas(middle);

        center
    }

    fn section(&self, title: &'static str) -> Line<'static> {
        Line::styled(
            title,
            self.theme.title_style().add_modifier(Modifier::UNDERLINED),
        )
    }

    fn help_line(&self, key: &'static str, desc: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), self.theme.key_style()),
            Span::raw(desc),
        ])
    }

    /// Build help content lines
    fn build_content(&self) -> Vec<Line<'static>> {
        vec![
            Line::default(),
            self.section("  Search"),
            Line::default(),
            self.help_line("Type", "Search after a short pause"),
            self.help_line("Enter", "Search now / retry"),
            self.help_line("Backspace", "Delete character"),
            self.help_line("Ctrl+W", "Delete word"),
            self.help_line("Ctrl+U", "Clear search"),
            Line::default(),
            self.section("  Verses"),
            Line::default(),
            self.help_line("→/↓/Ctrl+N", "Seek next verse"),
            self.help_line("←/↑/Ctrl+P", "Peek previous verse"),
            self.help_line("Ctrl+Y", "Copy verse"),
            self.help_line("Ctrl+S", "Share verse"),
            Line::default(),
            self.help_line("F1", "Toggle help"),
            self.help_line("Esc/Ctrl+C", "Quit"),
            Line::default(),
            Line::styled("  Press any key to close", self.theme.dimmed_style()),
        ]
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = Self::centered_rect(60, 70, area);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Help ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content())
            .block(block)
            .render(popup_area, buf);
    }
}
