//! Raw text extraction from uploaded documents.

mod pdf;

pub use pdf::PdfTextExtractor;

use thiserror::Error;

/// Errors raised while pulling text out of a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The PDF library rejected the document
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// The upload was empty
    #[error("document is empty")]
    Empty,

    /// The extraction task died (library panic or runtime shutdown)
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Anything that can turn document bytes into raw text.
///
/// Implementations are called from blocking worker threads and must not
/// share mutable state between calls.
pub trait TextExtractor: Send + Sync {
    /// Get the name of this extractor.
    fn name(&self) -> &'static str;

    /// Extract page-concatenated raw text from `bytes`.
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}
