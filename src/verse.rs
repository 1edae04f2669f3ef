//! Verse records returned by the search service

use crate::books;
use crate::markup;
use serde::{Deserialize, Serialize};

/// One matching verse
///
/// `text` is raw service markup; use [`VerseMatch::plain_text`] or
/// [`markup::highlight_segments`] before showing it anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMatch {
    /// Service-side record id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<u64>,
    /// Verse text with inline markup
    pub text: String,
    /// Book id (1-66)
    pub book: u32,
    pub chapter: u32,
    pub verse: u32,
    /// Translation code, when the service includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl VerseMatch {
    /// Create a verse match without a record id
    #[must_use]
    pub fn new(text: impl Into<String>, book: u32, chapter: u32, verse: u32) -> Self {
        Self {
            pk: None,
            text: text.into(),
            book,
            chapter,
            verse,
            translation: None,
        }
    }

    /// Set the translation code
    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Verse text with markup removed
    #[must_use]
    pub fn plain_text(&self) -> String {
        markup::strip_markup(&self.text)
    }

    /// Book name for display
    #[must_use]
    pub fn book_name(&self) -> String {
        books::display_name(self.book)
    }

    /// Human-readable reference, e.g. `John 3:16`
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book_name(), self.chapter, self.verse)
    }

    /// Translation code, falling back to `default` when the record has none
    #[must_use]
    pub fn translation_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.translation
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(default)
    }
}
