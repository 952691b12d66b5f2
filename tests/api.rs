//! HTTP-level tests driving the router with fake extraction and model backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use qgen::api::{build_router, AppState};
use qgen::chunkers::SentenceChunker;
use qgen::extraction::{ExtractionError, TextExtractor};
use qgen::generation::{
    GeneratedText, GenerationError, GenerationParams, QuestionGenerator, TextGenerationModel,
};
use qgen::pipeline::PipelineOrchestrator;
use qgen::types::{ChunkConfig, ServiceConfig};

const BOUNDARY: &str = "qgen-test-boundary";

/// Reads document bytes as UTF-8. Texts starting with `slow:` take longer.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = String::from_utf8_lossy(bytes).to_string();
        if text.starts_with("slow:") {
            std::thread::sleep(Duration::from_millis(150));
        }
        Ok(text)
    }
}

/// Produces questions that quote the chunk they came from.
struct QuotingModel;

#[async_trait]
impl TextGenerationModel for QuotingModel {
    fn name(&self) -> &str {
        "quoting"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedText>, GenerationError> {
        let chunk = prompt.rsplit("Text: ").next().unwrap_or_default();
        Ok((0..params.num_return_sequences)
            .map(|i| GeneratedText::new(format!("What about {chunk} ({i})?")))
            .collect())
    }
}

fn app() -> Router {
    let config = ServiceConfig::default();
    let pipeline = PipelineOrchestrator::new(
        Arc::new(PlainTextExtractor),
        Arc::new(SentenceChunker::new()),
        QuestionGenerator::new(Arc::new(QuotingModel)),
        ChunkConfig::with_max_length(64),
    );
    build_router(Arc::new(AppState::new(pipeline, config)))
}

fn multipart_body(files: &[(&str, &str)], num_questions: Option<&str>) -> Body {
    let mut body = String::new();
    if let Some(n) = num_questions {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"num_questions\"\r\n\r\n{n}\r\n"
        ));
    }
    for (filename, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

/// Status, body, content type and content disposition.
type Reply = (StatusCode, Vec<u8>, Option<String>, Option<String>);

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec(), content_type, disposition)
}

async fn create_session(app: &Router) -> String {
    let request = Request::post("/sessions").body(Body::empty()).unwrap();
    let (status, body, _, _) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["session_id"].as_str().unwrap().to_string()
}

async fn generate(app: &Router, session: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::post(format!("/sessions/{session}/generate"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap();
    let (status, body, _, _) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn download(app: &Router, session: &str) -> Reply {
    let request = Request::get(format!("/sessions/{session}/download"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_two_pdfs_in_upload_order() {
    let app = app();
    let session = create_session(&app).await;

    let body = multipart_body(
        &[
            ("first.pdf", "slow: Photosynthesis makes sugar. Plants need light."),
            ("second.pdf", "Rivers flow to the sea. Deltas form at river mouths."),
        ],
        Some("3"),
    );
    let (status, json) = generate(&app, &session, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["documents"], 2);
    assert_eq!(json["num_questions"], 3);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["heading"], "Questions from PDF 1:");
    assert_eq!(results[1]["heading"], "Questions from PDF 2:");

    let first = results[0]["questions"].as_array().unwrap();
    let second = results[1]["questions"].as_array().unwrap();
    assert!(first.len() <= 3 && !first.is_empty());
    assert!(second.len() <= 3 && !second.is_empty());
    assert!(first.iter().all(|q| q.as_str().unwrap().contains("Photosynthesis")));
    assert!(second.iter().all(|q| q.as_str().unwrap().contains("Rivers")));
    assert!(first[0].as_str().unwrap().starts_with("Q1: "));
}

#[tokio::test]
async fn test_no_files_gives_warning() {
    let app = app();
    let session = create_session(&app).await;

    let (status, json) = generate(&app, &session, multipart_body(&[], Some("3"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["warning"], "Please upload at least one PDF file.");

    let request = Request::get(format!("/sessions/{session}/questions"))
        .body(Body::empty())
        .unwrap();
    let (status, body, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_num_questions() {
    let app = app();
    let session = create_session(&app).await;
    let body = multipart_body(&[("a.pdf", "Some text.")], Some("11"));
    let (status, json) = generate(&app, &session, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["warning"].as_str().unwrap().contains("between 1 and 10"));
}

#[tokio::test]
async fn test_download_before_generation_warns() {
    let app = app();
    let session = create_session(&app).await;

    let (status, body, _, disposition) = download(&app, &session).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(disposition.is_none());
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["warning"], "Generate questions before downloading.");
}

#[tokio::test]
async fn test_download_after_generation() {
    let app = app();
    let session = create_session(&app).await;

    let body = multipart_body(&[("a.pdf", "Alpha text."), ("b.pdf", "Beta text.")], Some("1"));
    let (status, _) = generate(&app, &session, body).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body, content_type, disposition) = download(&app, &session).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain"));
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"questions.txt\"")
    );

    let text = String::from_utf8(body).unwrap();
    let sections: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(sections.len(), 2);
    assert!(sections[0].starts_with("PDF 1:\nWhat about Alpha text."));
    assert!(sections[1].starts_with("PDF 2:\nWhat about Beta text."));
}

#[tokio::test]
async fn test_sessions_do_not_share_results() {
    let app = app();
    let a = create_session(&app).await;
    let b = create_session(&app).await;

    let (status, _) = generate(&app, &a, multipart_body(&[("a.pdf", "Alpha text.")], None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _, _) = download(&app, &b).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_session() {
    let app = app();
    let (status, _, _, _) = download(&app, "00000000-0000-0000-0000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
