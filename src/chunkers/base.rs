//! Base trait for chunkers and sentence splitting helpers.

use crate::types::ChunkConfig;

/// Sentence-terminal punctuation.
pub const SENTENCE_DELIMITERS: [char; 3] = ['.', '!', '?'];

/// The core trait for splitting cleaned document text into model inputs.
pub trait Chunker: Send + Sync {
    /// Get the name of this chunker.
    fn name(&self) -> &'static str;

    /// Split `text` into chunks according to `config`.
    ///
    /// Empty input yields no chunks. Chunks are returned trimmed and in
    /// document order.
    fn chunk(&self, text: &str, config: &ChunkConfig) -> Vec<String>;
}

/// Split text at sentence boundaries.
///
/// A boundary is a delimiter followed by whitespace. The delimiter stays with
/// the preceding sentence and the whole whitespace run is dropped. Returned
/// sentences are trimmed; blank pieces are skipped.
pub fn split_sentences<'a>(text: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !delimiters.contains(&c) {
            continue;
        }
        let followed_by_space = chars.peek().map_or(false, |&(_, next)| next.is_whitespace());
        if !followed_by_space {
            continue;
        }

        push_trimmed(&mut sentences, &text[start..i + c.len_utf8()]);

        while chars.peek().map_or(false, |&(_, next)| next.is_whitespace()) {
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(j, _)| j);
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
