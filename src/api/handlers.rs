//! HTTP request handlers for the question generation service.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::QgenError;
use crate::output::{render_download, DOWNLOAD_FILENAME, DOWNLOAD_MIME};
use crate::pipeline::PipelineOrchestrator;
use crate::sessions::SessionStore;
use crate::types::{
    CreateSessionResponse, Document, GenerateResponse, RenderedQuestionSet, ServiceConfig,
    SessionQuestionsResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: PipelineOrchestrator,
    pub sessions: RwLock<SessionStore>,
    pub config: ServiceConfig,
}

impl AppState {
    pub fn new(pipeline: PipelineOrchestrator, config: ServiceConfig) -> Self {
        Self {
            pipeline,
            sessions: RwLock::new(SessionStore::new()),
            config,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create a session with an empty result.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let mut sessions = state.sessions.write().await;
    let session_id = sessions.create_session();
    let created_at = sessions
        .get_session(session_id)
        .map(|s| s.created_at)
        .unwrap_or_else(chrono::Utc::now);

    info!(session_id = %session_id, "Created session");

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            created_at,
        }),
    )
}

/// Upload PDFs and generate questions.
///
/// Multipart fields: one or more `files` parts (also accepted as `file`) and
/// an optional `num_questions` text part.
pub async fn generate_questions(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, QgenError> {
    state.sessions.write().await.touch(session_id)?;

    let mut documents = Vec::new();
    let mut num_questions = state.config.default_num_questions;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| QgenError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("num_questions") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| QgenError::InvalidUpload(e.to_string()))?;
                num_questions = value.trim().parse().map_err(|_| {
                    QgenError::InvalidUpload(format!("num_questions is not a number: {value}"))
                })?;
            }
            Some("files") | Some("file") => {
                let filename = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| QgenError::InvalidUpload(e.to_string()))?;
                let mut document = Document::new(documents.len(), bytes.to_vec());
                if let Some(filename) = filename {
                    document = document.with_filename(filename);
                }
                documents.push(document);
            }
            other => {
                debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    info!(
        session_id = %session_id,
        documents = documents.len(),
        num_questions,
        "Received generation request"
    );

    state.sessions.write().await.begin_run(session_id)?;
    let results = match state.pipeline.process(documents, num_questions).await {
        Ok(results) => results,
        Err(e) => {
            state.sessions.write().await.cancel_run(session_id);
            return Err(e);
        }
    };
    let rendered: Vec<RenderedQuestionSet> =
        results.iter().map(RenderedQuestionSet::from).collect();
    let document_count = results.len();

    state.sessions.write().await.finish_run(session_id, results)?;

    Ok(Json(GenerateResponse {
        session_id,
        documents: document_count,
        num_questions,
        results: rendered,
    }))
}

/// Current session result as numbered lists.
pub async fn get_questions(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionQuestionsResponse>, QgenError> {
    let mut sessions = state.sessions.write().await;
    let record = sessions.touch(session_id)?;

    let results = record
        .questions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(RenderedQuestionSet::from)
        .collect();

    Ok(Json(SessionQuestionsResponse {
        session_id,
        results,
        updated_at: record.updated_at,
    }))
}

/// Download the session result as `questions.txt`.
pub async fn download_questions(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, QgenError> {
    let mut sessions = state.sessions.write().await;
    sessions.touch(session_id)?;
    let body = render_download(sessions.questions(session_id)?);

    info!(session_id = %session_id, bytes = body.len(), "Serving question download");

    Ok((
        [
            (header::CONTENT_TYPE, DOWNLOAD_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        body,
    ))
}
