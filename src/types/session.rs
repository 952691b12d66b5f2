//! Session request/response definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::QuestionSet;

/// Response when creating a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// ID of the created session
    pub session_id: Uuid,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// Response after a generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Session the result was stored in
    pub session_id: Uuid,

    /// Number of documents processed
    pub documents: usize,

    /// Questions requested per document
    pub num_questions: usize,

    /// One rendered entry per uploaded document, in upload order
    pub results: Vec<RenderedQuestionSet>,
}

/// A question set rendered as the numbered list shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedQuestionSet {
    /// e.g. "Questions from PDF 1:"
    pub heading: String,

    /// e.g. ["Q1: What is ...?", "Q2: ..."]
    pub questions: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response with the current session result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuestionsResponse {
    pub session_id: Uuid,

    /// Empty until the first generation pass
    pub results: Vec<RenderedQuestionSet>,

    /// When the result was last replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body returned for user-visible warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningResponse {
    pub warning: String,
}

impl From<&QuestionSet> for RenderedQuestionSet {
    fn from(set: &QuestionSet) -> Self {
        Self {
            heading: crate::output::section_heading(set.document_index),
            questions: crate::output::numbered_questions(&set.questions),
            warning: set.warning.clone(),
        }
    }
}
