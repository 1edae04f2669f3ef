//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the application.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for the title, focused borders and the verse reference
    pub accent: Color,
    /// Color for words the service marked as matches
    pub match_highlight: Color,
    /// Color for verse text
    pub verse: Color,
    /// Color for key names in hints
    pub key: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for warning messages
    pub warning: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            accent: Color::Rgb(217, 119, 6),
            match_highlight: Color::Yellow,
            verse: Color::White,
            key: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the focused search box border
    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for verse text
    #[must_use]
    pub fn verse_style(&self) -> Style {
        Style::default().fg(self.verse).add_modifier(Modifier::ITALIC)
    }

    /// Style for matched words inside verse text
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    /// Style for the verse reference line
    #[must_use]
    pub fn reference_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for pane titles
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for key names in hints
    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.key).add_modifier(Modifier::BOLD)
    }

    /// Style for plain messages
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for success messages
    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for error messages
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for info messages
    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for placeholder and empty-state text
    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.dimmed)
            .add_modifier(Modifier::ITALIC)
    }
}
