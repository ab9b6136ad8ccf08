//! Error types shared across crates

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// The model answered, but not in the agreed answer format
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
