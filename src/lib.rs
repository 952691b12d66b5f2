//! Question Generation Service Library
//!
//! Extracts text from uploaded PDF documents, splits it into sentence-aligned
//! chunks, and samples questions produced by a seq2seq question-generation
//! model for each document.

pub mod api;
pub mod chunkers;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod sessions;
pub mod types;

pub use chunkers::{Chunker, SentenceChunker};
pub use error::QgenError;
pub use extraction::{PdfTextExtractor, TextExtractor};
pub use generation::{InferenceClient, QuestionGenerator, TextGenerationModel};
pub use pipeline::PipelineOrchestrator;
pub use processing::TextCleaner;
pub use sessions::SessionStore;
pub use types::{ChunkConfig, Document, QuestionSet, ServiceConfig};

/// Default maximum chunk length in characters
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 512;

/// Default number of questions sampled per document
pub const DEFAULT_NUM_QUESTIONS: usize = 3;

/// Smallest accepted `num_questions`
pub const MIN_NUM_QUESTIONS: usize = 1;

/// Largest accepted `num_questions`
pub const MAX_NUM_QUESTIONS: usize = 10;

/// Maximum tokens the model may generate per candidate
pub const MAX_NEW_TOKENS: u32 = 100;

/// Beam search width used for every generation call
pub const NUM_BEAMS: u32 = 10;

/// Upper bound on candidate sequences requested per chunk
pub const MAX_RETURN_SEQUENCES: u32 = 10;

/// Default question-generation model id
pub const DEFAULT_MODEL: &str = "valhalla/t5-base-qg-hl";
