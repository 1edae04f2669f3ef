//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "Enter", "C-y")
    pub key: String,
    /// Action description (e.g., "search", "copy")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    /// Hints to display
    hints: &'a [KeyHint],
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for the current screen
    ///
    /// Peek/seek only appear when there is more than one verse to move
    /// between; copy and share only when a verse is shown.
    #[must_use]
    pub fn hints_for(result_count: usize, has_verse: bool) -> Vec<KeyHint> {
        let mut hints = Vec::new();
        if result_count > 1 {
            hints.push(KeyHint::new("←", "peek"));
            hints.push(KeyHint::new("→", "seek"));
        }
        hints.push(KeyHint::new("Enter", "search"));
        if has_verse {
            hints.push(KeyHint::new("C-y", "copy"));
            hints.push(KeyHint::new("C-s", "share"));
        }
        hints.push(KeyHint::new("F1", "help"));
        hints.push(KeyHint::new("Esc", "quit"));
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.key_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(hints: &[KeyHint]) -> Vec<&str> {
        hints.iter().map(|h| h.key.as_str()).collect()
    }

    #[test]
    fn test_navigation_hints_need_multiple_results() {
        assert_eq!(keys(&HelpBar::hints_for(0, false)), ["Enter", "F1", "Esc"]);
        assert_eq!(
            keys(&HelpBar::hints_for(1, true)),
            ["Enter", "C-y", "C-s", "F1", "Esc"]
        );
        assert_eq!(
            keys(&HelpBar::hints_for(3, true)),
            ["←", "→", "Enter", "C-y", "C-s", "F1", "Esc"]
        );
    }
}
