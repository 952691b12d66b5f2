//! Text normalization for extracted PDF text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of characters outside printable ASCII. ASCII whitespace is left
    /// for the whitespace pass.
    static ref NON_PRINTABLE: Regex = Regex::new(r"[^\x20-\x7E\t\n\r\x0B\x0C]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalizes raw extracted text before chunking.
///
/// 1. Replace every run of non-printable or non-ASCII characters with one space
/// 2. Collapse whitespace runs (including newlines) to one space
/// 3. Trim both ends
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string. Never fails; may return an empty string.
    pub fn clean(&self, text: &str) -> String {
        let ascii = NON_PRINTABLE.replace_all(text, " ");
        let collapsed = WHITESPACE.replace_all(&ascii, " ");
        collapsed.trim().to_string()
    }
}

/// Clean text with the default cleaner.
pub fn clean_text(text: &str) -> String {
    TextCleaner::new().clean(text)
}
