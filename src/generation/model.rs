//! The external text-generation capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MAX_NEW_TOKENS, MAX_RETURN_SEQUENCES, NUM_BEAMS};

/// Generation parameters passed with every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum tokens generated per candidate
    pub max_new_tokens: u32,

    /// Number of candidate sequences returned
    pub num_return_sequences: u32,

    /// Beam search width
    pub num_beams: u32,
}

impl GenerationParams {
    /// Parameters for a request of `num_questions` questions:
    /// `min(10, num_questions * 2)` candidates, 10 beams, 100 new tokens.
    pub fn for_questions(num_questions: usize) -> Self {
        let wanted = u32::try_from(num_questions.saturating_mul(2)).unwrap_or(u32::MAX);
        Self {
            max_new_tokens: MAX_NEW_TOKENS,
            num_return_sequences: wanted.min(MAX_RETURN_SEQUENCES),
            num_beams: NUM_BEAMS,
        }
    }
}

/// One candidate returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

impl GeneratedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            generated_text: text.into(),
        }
    }
}

/// Errors raised by a generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse model response: {0}")]
    Parse(String),
}

/// A pretrained text2text model that turns a prompt into candidate texts.
///
/// The pipeline calls this sequentially, one chunk at a time.
#[async_trait]
pub trait TextGenerationModel: Send + Sync {
    /// Get the name of the backing model.
    fn name(&self) -> &str;

    /// Generate candidates for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedText>, GenerationError>;
}
