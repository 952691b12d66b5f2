//! Pipeline orchestrator: concurrent extraction, sequential generation.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::chunkers::{Chunker, SentenceChunker};
use crate::error::{validate_num_questions, QgenError};
use crate::extraction::{ExtractionError, PdfTextExtractor, TextExtractor};
use crate::generation::{QuestionGenerator, TextGenerationModel};
use crate::processing::TextCleaner;
use crate::types::{ChunkConfig, Document, QuestionSet, ServiceConfig};

/// Runs uploaded documents through extract → clean → chunk → generate.
///
/// Extraction and cleaning run on the blocking pool, at most
/// `extraction_concurrency` at a time, and are collected back in upload
/// order. Chunking and generation then run one document at a time so the
/// model never sees concurrent calls from a single request.
pub struct PipelineOrchestrator {
    extractor: Arc<dyn TextExtractor>,
    cleaner: TextCleaner,
    chunker: Arc<dyn Chunker>,
    generator: QuestionGenerator,
    chunk_config: ChunkConfig,
    extraction_concurrency: usize,
}

impl PipelineOrchestrator {
    /// Create an orchestrator from its parts.
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        chunker: Arc<dyn Chunker>,
        generator: QuestionGenerator,
        chunk_config: ChunkConfig,
    ) -> Self {
        Self {
            extractor,
            cleaner: TextCleaner::new(),
            chunker,
            generator,
            chunk_config,
            extraction_concurrency: 4,
        }
    }

    /// Create the production pipeline: PDF extraction, sentence chunking and
    /// the given model.
    pub fn from_config(config: &ServiceConfig, model: Arc<dyn TextGenerationModel>) -> Self {
        Self::new(
            Arc::new(PdfTextExtractor::new()),
            Arc::new(SentenceChunker::new()),
            QuestionGenerator::new(model).with_seed(config.sampling_seed),
            config.chunk_config(),
        )
        .with_extraction_concurrency(config.extraction_concurrency)
    }

    /// Bound the number of concurrent extractions.
    pub fn with_extraction_concurrency(mut self, concurrency: usize) -> Self {
        self.extraction_concurrency = concurrency.max(1);
        self
    }

    /// Process a batch of documents into one question set per document.
    ///
    /// A document that cannot be read yields an empty set with a warning;
    /// the rest of the batch is unaffected.
    pub async fn process(
        &self,
        documents: Vec<Document>,
        num_questions: usize,
    ) -> Result<Vec<QuestionSet>, QgenError> {
        let num_questions = validate_num_questions(num_questions)?;
        if documents.is_empty() {
            return Err(QgenError::NoDocuments);
        }

        info!(
            documents = documents.len(),
            num_questions,
            extractor = self.extractor.name(),
            chunker = self.chunker.name(),
            "Processing upload batch"
        );

        let labels: Vec<String> = documents.iter().map(Document::label).collect();
        let texts = self.extract_all(documents).await;

        let mut results = Vec::with_capacity(texts.len());
        for (index, (text, label)) in texts.into_iter().zip(labels).enumerate() {
            match text {
                Ok(text) => {
                    let chunks = self.chunker.chunk(&text, &self.chunk_config);
                    let questions = self.generator.generate(&chunks, num_questions).await;
                    info!(
                        document = %label,
                        chars = text.len(),
                        chunks = chunks.len(),
                        questions = questions.len(),
                        "Document processed"
                    );
                    results.push(QuestionSet::new(index, questions));
                }
                Err(e) => {
                    warn!(document = %label, error = %e, "Skipping unreadable document");
                    results.push(QuestionSet::failed(
                        index,
                        format!("Could not read {label}: {e}"),
                    ));
                }
            }
        }

        Ok(results)
    }

    /// Extract and clean every document concurrently; results are returned
    /// in the order the documents were given.
    pub async fn extract_all(
        &self,
        documents: Vec<Document>,
    ) -> Vec<Result<String, ExtractionError>> {
        let semaphore = Arc::new(Semaphore::new(self.extraction_concurrency));

        let tasks = documents.into_iter().map(|document| {
            let semaphore = Arc::clone(&semaphore);
            let extractor = Arc::clone(&self.extractor);
            let cleaner = self.cleaner;

            async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return Err(ExtractionError::Task(e.to_string())),
                };

                let handle = tokio::task::spawn_blocking(move || {
                    extractor
                        .extract(&document.bytes)
                        .map(|raw| cleaner.clean(&raw))
                });

                match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(ExtractionError::Task(e.to_string())),
                }
            }
        });

        join_all(tasks).await
    }
}
