//! Ratatui widgets for the verse search TUI

mod help_bar;
mod help_overlay;
mod search_bar;
mod status_bar;
mod verse_pane;

pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
pub use verse_pane::VersePane;
