//! Output abstraction layer
//!
//! Status output for the command-line commands goes through [`OutputWriter`];
//! the TUI shows the same [`MessageLevel`]s in its status bar instead.

use crate::markup;
use crate::verse::VerseMatch;
use colored::Colorize;

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use iquote::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.write("Normal message");
/// output.success("Operation completed!");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message (always shown, this is the command's result)
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
///
/// In quiet mode only results (`write`) and errors are printed.
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠️".yellow(), message);
        }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.dimmed());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// Render a verse for the terminal: matched words bold, reference dimmed
#[must_use]
pub fn format_verse(verse: &VerseMatch, default_translation: &str) -> String {
    let text: String = markup::highlight_segments(&verse.text)
        .iter()
        .map(|segment| {
            if segment.highlighted {
                segment.text.bold().yellow().to_string()
            } else {
                segment.text.clone()
            }
        })
        .collect();

    format!(
        "{}\n  {}",
        text.trim(),
        format!(
            "— {} ({})",
            verse.reference(),
            verse.translation_or(default_translation)
        )
        .dimmed()
    )
}
