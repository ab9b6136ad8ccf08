//! LLM integration for the grammar checker
//!
//! Features:
//! - OpenAI-compatible chat-completions backend (OpenAI, Azure, local servers)
//! - Adapter to the core `LanguageModel` trait
//! - Factory building the model from settings
//!
//! Calls are never retried; a failure is returned to the caller as-is.

pub mod adapter;
pub mod backend;
pub mod factory;
pub mod prompt;

pub use adapter::LanguageModelAdapter;
pub use backend::{
    FinishReason, GenerationOptions, GenerationResult, LlmBackend, OpenAIBackend, OpenAIConfig,
};
pub use factory::LlmFactory;
pub use prompt::{Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for tagasuri_core::Error {
    fn from(err: LlmError) -> Self {
        tagasuri_core::Error::Llm(err.to_string())
    }
}
