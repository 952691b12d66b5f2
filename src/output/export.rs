//! Rendering of question sets for display and download.

use crate::types::QuestionSet;

/// Filename offered for the download.
pub const DOWNLOAD_FILENAME: &str = "questions.txt";

/// MIME type of the download.
pub const DOWNLOAD_MIME: &str = "text/plain";

/// Heading shown above a document's questions.
pub fn section_heading(document_index: usize) -> String {
    format!("Questions from PDF {}:", document_index + 1)
}

/// Number questions for display: `Q1: ...`, `Q2: ...`.
pub fn numbered_questions(questions: &[String]) -> Vec<String> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("Q{}: {}", i + 1, q))
        .collect()
}

/// Render the plain-text download: a `PDF {n}:` header per document followed
/// by its questions one per line, documents separated by a blank line.
pub fn render_download(sets: &[QuestionSet]) -> String {
    sets.iter()
        .enumerate()
        .map(|(i, set)| {
            let mut section = format!("PDF {}:", i + 1);
            for question in &set.questions {
                section.push('\n');
                section.push_str(question);
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
