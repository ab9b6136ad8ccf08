//! Tagasuri Server
//!
//! HTTP endpoints for the Filipino grammar checker.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_error, record_llm_latency, record_rejection, record_request};
pub use state::{AppState, LexiconStats};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The grammar model could not be reached or failed
    #[error("{0}")]
    Upstream(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Label used for the errors metric
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::Upstream(_) => "upstream",
            ServerError::MalformedResponse(_) => "malformed_response",
            ServerError::Config(_) => "config",
            ServerError::Internal(_) => "internal",
        }
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tagasuri_core::Error> for ServerError {
    fn from(err: tagasuri_core::Error) -> Self {
        match err {
            tagasuri_core::Error::Llm(msg) => ServerError::Upstream(msg),
            tagasuri_core::Error::MalformedResponse(msg) => ServerError::MalformedResponse(msg),
            tagasuri_core::Error::Config(msg) => ServerError::Config(msg),
            tagasuri_core::Error::TextProcessing(msg) => ServerError::Internal(msg),
        }
    }
}

impl From<tagasuri_config::ConfigError> for ServerError {
    fn from(err: tagasuri_config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<tagasuri_llm::LlmError> for ServerError {
    fn from(err: tagasuri_llm::LlmError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
