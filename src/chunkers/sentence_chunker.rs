//! Sentence-based chunker that respects sentence boundaries.

use super::base::{split_sentences, Chunker, SENTENCE_DELIMITERS};
use crate::types::ChunkConfig;

/// Sentence-based chunker that packs whole sentences into bounded chunks.
///
/// Sentences are appended to the running chunk while
/// `current_len + sentence_len <= max_length`. In the default (non-strict)
/// mode the joining space is not counted. The first chunk is measured with
/// one leading separator, so it never exceeds the bound; chunks opened by an
/// overflowing sentence may end up one character over it. A sentence longer
/// than the bound is never split and becomes a chunk of its own. Lengths are
/// counted in characters.
pub struct SentenceChunker {
    /// Sentence-ending delimiters
    delimiters: Vec<char>,
}

impl SentenceChunker {
    /// Create a new sentence chunker with default delimiters.
    pub fn new() -> Self {
        Self {
            delimiters: SENTENCE_DELIMITERS.to_vec(),
        }
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunker for SentenceChunker {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn chunk(&self, text: &str, config: &ChunkConfig) -> Vec<String> {
        let separator = usize::from(config.strict_length);
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for sentence in split_sentences(text, &self.delimiters) {
            let sentence_len = sentence.chars().count();

            if current.is_empty() {
                // The opening chunk carries a leading separator until trimmed.
                let leading = usize::from(chunks.is_empty() && !config.strict_length);
                current.push_str(sentence);
                current_len = leading + sentence_len;
            } else if current_len + separator + sentence_len <= config.max_length {
                current.push(' ');
                current.push_str(sentence);
                current_len += 1 + sentence_len;
            } else {
                chunks.push(std::mem::take(&mut current));
                current.push_str(sentence);
                current_len = sentence_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

/// Chunk `text` with the default sentence chunker and a `max_length` bound.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<String> {
    SentenceChunker::new().chunk(text, &ChunkConfig::with_max_length(max_length))
}
