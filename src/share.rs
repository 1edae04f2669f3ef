//! Clipboard and share-link formatting
//!
//! All text produced here is built from sanitized verse text. The platform
//! calls (`arboard`, `open`) are thin wrappers and report failures as
//! [`ShareError`] so the TUI can show them in the status bar.

use crate::verse::VerseMatch;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors from clipboard or browser integration
#[derive(Debug, Error)]
pub enum ShareError {
    /// Clipboard could not be opened or written
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// Share link could not be opened
    #[error("Failed to open link: {0}")]
    Open(#[from] std::io::Error),
}

/// Where share links point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Base of the verse deep link
    pub base_url: String,
    /// Bible version id used in the deep link
    pub version_id: u32,
    /// Prefix the encoded message is appended to
    pub message_url: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: "https://bible.com/bible".to_string(),
            version_id: 114,
            message_url: "https://wa.me/?text=".to_string(),
        }
    }
}

/// Plain-text rendering for the clipboard
///
/// `<text> — <book> <chapter>:<verse> (<translation>)`
#[must_use]
pub fn clipboard_text(verse: &VerseMatch, default_translation: &str) -> String {
    format!(
        "{} ({})",
        share_message(verse),
        verse.translation_or(default_translation)
    )
}

/// Message body for sharing: `<text> — <book> <chapter>:<verse>`
#[must_use]
pub fn share_message(verse: &VerseMatch) -> String {
    format!("{} — {}", verse.plain_text().trim(), verse.reference())
}

/// Link to the verse on the reading site, e.g. `.../114/1John.4.8`
#[must_use]
pub fn deep_link(verse: &VerseMatch, settings: &ShareSettings) -> String {
    let book: String = verse
        .book_name()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!(
        "{}/{}/{book}.{}.{}",
        settings.base_url.trim_end_matches('/'),
        settings.version_id,
        verse.chapter,
        verse.verse
    )
}

/// Outbound share URL with the message and deep link pre-filled
#[must_use]
pub fn share_url(verse: &VerseMatch, settings: &ShareSettings) -> String {
    let full = format!("{} {}", share_message(verse), deep_link(verse, settings));
    format!(
        "{}{}",
        settings.message_url,
        utf8_percent_encode(&full, URI_COMPONENT)
    )
}

/// Put text on the system clipboard
///
/// # Errors
///
/// Returns `ShareError::Clipboard` if no clipboard is available or the write
/// is rejected.
pub fn copy_to_clipboard(text: &str) -> Result<(), ShareError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ShareError::Clipboard(e.to_string()))
}

/// Open a URL with the system's default handler
///
/// # Errors
///
/// Returns `ShareError::Open` if no handler could be launched.
pub fn open_url(url: &str) -> Result<(), ShareError> {
    open::that(url)?;
    Ok(())
}
