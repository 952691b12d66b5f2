//! Mapping of pipeline errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::QgenError;
use crate::types::WarningResponse;

impl QgenError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            QgenError::NoDocuments
            | QgenError::InvalidNumQuestions(_)
            | QgenError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            QgenError::NoQuestions => StatusCode::CONFLICT,
            QgenError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            QgenError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QgenError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = WarningResponse {
            warning: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
