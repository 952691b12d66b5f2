//! Question generation over document chunks.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::{debug, warn};

use super::model::{GenerationParams, TextGenerationModel};

/// Instruction prepended to every chunk.
pub const PROMPT_PREFIX: &str = "You are a professor conducting an examination for your students. \
Generate possible questions from the following text. Text: ";

/// Generates candidate questions for each chunk and samples a subset.
pub struct QuestionGenerator {
    model: Arc<dyn TextGenerationModel>,
    seed: Option<u64>,
}

impl QuestionGenerator {
    /// Create a generator around a model.
    pub fn new(model: Arc<dyn TextGenerationModel>) -> Self {
        Self { model, seed: None }
    }

    /// Fix the sampling seed for reproducible output.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the model prompt for one chunk.
    pub fn build_prompt(chunk: &str) -> String {
        format!("{PROMPT_PREFIX}{chunk}")
    }

    /// Generate `num_questions` questions from `chunks`.
    ///
    /// Returns `min(num_questions, pool size)` questions drawn without
    /// replacement from every candidate of every chunk. Duplicates produced
    /// by the model are kept.
    pub async fn generate(&self, chunks: &[String], num_questions: usize) -> Vec<String> {
        let pool = self.candidate_pool(chunks, num_questions).await;
        self.sample(&pool, num_questions)
    }

    /// Run the model over every chunk, in order, and collect all candidates.
    ///
    /// A chunk whose model call fails is skipped.
    pub async fn candidate_pool(&self, chunks: &[String], num_questions: usize) -> Vec<String> {
        let params = GenerationParams::for_questions(num_questions);
        let mut pool = Vec::new();

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            let prompt = Self::build_prompt(chunk);
            match self.model.generate(&prompt, &params).await {
                Ok(candidates) => {
                    debug!(chunk_index, candidates = candidates.len(), "Generated candidates");
                    pool.extend(candidates.into_iter().map(|c| c.generated_text));
                }
                Err(e) => {
                    warn!(
                        chunk_index,
                        model = self.model.name(),
                        error = %e,
                        "Generation failed for chunk, skipping"
                    );
                }
            }
        }

        pool
    }

    /// Uniformly sample `min(num_questions, pool.len())` entries without
    /// replacement, in random order.
    pub fn sample(&self, pool: &[String], num_questions: usize) -> Vec<String> {
        let amount = num_questions.min(pool.len());
        let picked = match self.seed {
            Some(seed) => index::sample(&mut StdRng::seed_from_u64(seed), pool.len(), amount),
            None => index::sample(&mut rand::thread_rng(), pool.len(), amount),
        };
        picked.into_iter().map(|i| pool[i].clone()).collect()
    }
}
