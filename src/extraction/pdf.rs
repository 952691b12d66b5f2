//! PDF text extraction backed by the `pdf-extract` crate.

use tracing::debug;

use super::{ExtractionError, TextExtractor};

/// Extracts the text layer of a PDF, pages concatenated in order.
///
/// Scanned/image-only PDFs have no text layer and produce an empty string,
/// which later yields no chunks and no questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}
