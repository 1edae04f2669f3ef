//! iquote - a terminal scripture finder
//!
//! This library provides the pieces behind the `iquote` binary: a debounced
//! search controller that turns keystrokes into remote verse lookups, the
//! HTTP client for the verse-search service, markup sanitization, and
//! clipboard/share formatting for the displayed verse.

use thiserror::Error;

pub mod books;
pub mod cli;
pub mod config;
pub mod markup;
pub mod search;
pub mod share;
pub mod source;
pub mod ui;
pub mod verse;

pub use search::{DisplayState, RequestState, SearchController};
pub use verse::VerseMatch;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum IquoteError {
    /// Verse source error
    #[error("Search error: {0}")]
    SourceError(#[from] source::SourceError),
    /// Clipboard or share link error
    #[error("Share error: {0}")]
    ShareError(#[from] share::ShareError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Results could not be encoded as JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
