//! Question generation: the model capability and sampling on top of it.

mod inference_client;
mod model;
mod question_generator;

pub use inference_client::InferenceClient;
pub use model::{GeneratedText, GenerationError, GenerationParams, TextGenerationModel};
pub use question_generator::{QuestionGenerator, PROMPT_PREFIX};
