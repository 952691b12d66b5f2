//! Chunking strategies for cleaned document text.

mod base;
mod sentence_chunker;

pub use base::{split_sentences, Chunker, SENTENCE_DELIMITERS};
pub use sentence_chunker::{chunk_text, SentenceChunker};
