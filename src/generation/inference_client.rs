//! HTTP client for a hosted text2text-generation endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::model::{GeneratedText, GenerationError, GenerationParams, TextGenerationModel};
use crate::types::ServiceConfig;

/// Client for a Hugging Face style inference endpoint.
///
/// `POST {url}` with `{"inputs": ..., "parameters": {...}}`, answered by
/// `[{"generated_text": ...}, ...]`.
pub struct InferenceClient {
    client: Client,
    url: String,
    model: String,
    api_token: Option<String>,
}

/// Request payload for the inference endpoint.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

impl InferenceClient {
    /// Create a new inference client.
    pub fn new(
        url: &str,
        model: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            model: model.to_string(),
            api_token,
        })
    }

    /// Create a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, GenerationError> {
        Self::new(
            &config.generation_url,
            &config.model,
            config.generation_api_token.clone(),
            Duration::from_secs(config.generation_timeout_secs),
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl TextGenerationModel for InferenceClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedText>, GenerationError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: params,
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };

        debug!(url = %self.url, prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .authorized(self.client.post(&self.url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Generation endpoint returned an error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Parse the endpoint's JSON body into candidates.
fn parse_response(body: &str) -> Result<Vec<GeneratedText>, GenerationError> {
    serde_json::from_str::<Vec<GeneratedText>>(body).map_err(|e| {
        GenerationError::Parse(format!("{e}: {}", body.chars().take(200).collect::<String>()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = InferenceClient::new(
            "http://localhost:8080/generate",
            "valhalla/t5-base-qg-hl",
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.name(), "valhalla/t5-base-qg-hl");
        assert_eq!(client.url, "http://localhost:8080/generate");
    }

    async fn serve_status(status: u16, body: &'static str) -> String {
        use axum::http::StatusCode;
        use axum::routing::post;

        let code = StatusCode::from_u16(status).unwrap();
        let app = axum::Router::new().route("/generate", post(move || async move { (code, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    #[tokio::test]
    async fn test_error_status_is_returned_to_caller() {
        let url = serve_status(503, "Model is overloaded").await;
        let client = InferenceClient::new(&url, "m", None, Duration::from_secs(5)).unwrap();

        let result = client
            .generate("Text: cells divide.", &GenerationParams::for_questions(1))
            .await;
        match result {
            Err(GenerationError::Api { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "Model is overloaded");
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_body_is_parsed() {
        let url = serve_status(200, r#"[{"generated_text": "What is a cell?"}]"#).await;
        let client = InferenceClient::new(&url, "m", None, Duration::from_secs(5)).unwrap();

        let result = client
            .generate("Text: cells divide.", &GenerationParams::for_questions(1))
            .await
            .unwrap();
        assert_eq!(result, vec![GeneratedText::new("What is a cell?")]);
    }

    #[test]
    fn test_request_shape() {
        let params = GenerationParams::for_questions(3);
        let request = InferenceRequest {
            inputs: "Text: cells divide.",
            parameters: &params,
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: true,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"], "Text: cells divide.");
        assert_eq!(value["parameters"]["max_new_tokens"], 100);
        assert_eq!(value["parameters"]["num_return_sequences"], 6);
        assert_eq!(value["parameters"]["num_beams"], 10);
    }

    #[test]
    fn test_parse_response() {
        let parsed = parse_response(
            r#"[{"generated_text": "What is a cell?"}, {"generated_text": "Why do cells divide?"}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].generated_text, "What is a cell?");
    }

    #[test]
    fn test_parse_error_object() {
        let result = parse_response(r#"{"error": "Model is loading"}"#);
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }
}
