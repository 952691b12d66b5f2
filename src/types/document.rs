//! Uploaded document type.

/// A single uploaded PDF.
///
/// Documents have no identity beyond their position in the upload sequence.
/// The filename is carried for logging only.
#[derive(Debug, Clone)]
pub struct Document {
    /// Zero-based position in the uploaded-files sequence
    pub index: usize,

    /// Original filename, if the client sent one
    pub filename: Option<String>,

    /// Raw PDF bytes
    pub bytes: Vec<u8>,
}

impl Document {
    /// Create a new document at the given upload position.
    pub fn new(index: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            index,
            filename: None,
            bytes: bytes.into(),
        }
    }

    /// Attach the original filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Human-readable label used in logs.
    pub fn label(&self) -> String {
        match &self.filename {
            Some(name) => format!("PDF {} ({})", self.index + 1, name),
            None => format!("PDF {}", self.index + 1),
        }
    }
}
