//! Error types for the question generation pipeline.

use thiserror::Error;

use crate::{MAX_NUM_QUESTIONS, MIN_NUM_QUESTIONS};

/// Errors surfaced by the pipeline and session layer.
///
/// Per-document extraction failures and per-chunk generation failures are
/// not represented here: they degrade the affected document instead of
/// failing the whole request.
#[derive(Debug, Error)]
pub enum QgenError {
    /// No documents were supplied with a generation request
    #[error("Please upload at least one PDF file.")]
    NoDocuments,

    /// `num_questions` outside the accepted range
    #[error("num_questions must be between 1 and 10, got {0}")]
    InvalidNumQuestions(usize),

    /// Download requested before any generation populated the session
    #[error("Generate questions before downloading.")]
    NoQuestions,

    /// Unknown session id
    #[error("Session not found: {0}")]
    SessionNotFound(uuid::Uuid),

    /// Malformed upload request
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Validate a requested question count.
pub fn validate_num_questions(num_questions: usize) -> Result<usize, QgenError> {
    if (MIN_NUM_QUESTIONS..=MAX_NUM_QUESTIONS).contains(&num_questions) {
        Ok(num_questions)
    } else {
        Err(QgenError::InvalidNumQuestions(num_questions))
    }
}
