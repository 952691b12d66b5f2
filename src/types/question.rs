//! Question set type.

use serde::{Deserialize, Serialize};

/// The sampled questions for one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Zero-based position of the source document in the upload
    pub document_index: usize,

    /// Sampled questions, in random order
    pub questions: Vec<String>,

    /// Set when the document could not be processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl QuestionSet {
    /// Create a question set for the document at `document_index`.
    pub fn new(document_index: usize, questions: Vec<String>) -> Self {
        Self {
            document_index,
            questions,
            warning: None,
        }
    }

    /// An empty set carrying a warning for a document that failed.
    pub fn failed(document_index: usize, warning: impl Into<String>) -> Self {
        Self {
            document_index,
            questions: Vec::new(),
            warning: Some(warning.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
