//! Verse text sanitization
//!
//! Verse text from the search service carries inline markup: `<mark>` around
//! the words that matched the query, and occasionally other tags such as
//! `<i>` or `<br/>`. Nothing in this crate interprets markup, so every piece of
//! verse text passes through here before it is rendered, copied, or shared.

use regex::Regex;
use std::sync::LazyLock;

/// Any opening or closing tag, including one left unterminated at the end
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([^>]+)(?:>|$)").expect("tag pattern is a valid regex")
});

/// Tags whose content the service uses to mark matched words
const HIGHLIGHT_TAGS: &[&str] = &["mark", "b", "strong"];

/// A run of sanitized text and whether it was marked as a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn new(text: String, highlighted: bool) -> Self {
        Self { text, highlighted }
    }
}

/// Remove all tags from `text` and decode the common HTML entities
#[must_use]
pub fn strip_markup(text: &str) -> String {
    decode_entities(&TAG_PATTERN.replace_all(text, ""))
}

/// Split `text` into plain and highlighted runs with all markup removed
///
/// Adjacent runs with the same highlighting are merged and empty runs are
/// dropped. Unbalanced closing tags are ignored.
#[must_use]
pub fn highlight_segments(text: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;

    for caps in TAG_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_segment(&mut segments, &text[last..whole.start()], depth > 0);
        last = whole.end();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = caps.get(2).map_or("", |m| tag_name(m.as_str()));
        if HIGHLIGHT_TAGS.contains(&name.to_ascii_lowercase().as_str()) {
            if closing {
                depth = depth.saturating_sub(1);
            } else {
                depth += 1;
            }
        }
    }
    push_segment(&mut segments, &text[last..], depth > 0);

    segments
}

fn push_segment(segments: &mut Vec<Segment>, raw: &str, highlighted: bool) {
    if raw.is_empty() {
        return;
    }
    let text = decode_entities(raw);
    match segments.last_mut() {
        Some(prev) if prev.highlighted == highlighted => prev.text.push_str(&text),
        _ => segments.push(Segment::new(text, highlighted)),
    }
}

/// Tag name from the inside of a tag, e.g. `span class="x"` -> `span`
fn tag_name(inner: &str) -> &str {
    inner
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
