use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use oum_sdk::SdkError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Sdk(#[from] SdkError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Sdk(e) if e.is_corrupted() || e.is_invalid_input() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the drawing page.
    fn client_message(&self) -> String {
        match self {
            Self::Sdk(SdkError::InvalidInput(_)) => "Invalid JSON".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors are reported as `{"ok": false, "error": "..."}`.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({ "ok": false, "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
