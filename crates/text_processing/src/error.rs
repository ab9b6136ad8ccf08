//! Error types for text processing

use thiserror::Error;

/// Text processing errors
#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Grammar check error: {0}")]
    GrammarError(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

impl From<TextProcessingError> for tagasuri_core::Error {
    fn from(err: TextProcessingError) -> Self {
        match err {
            TextProcessingError::MalformedResponse(msg) => {
                tagasuri_core::Error::MalformedResponse(msg)
            }
            other => tagasuri_core::Error::TextProcessing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_core_error() {
        let err: tagasuri_core::Error =
            TextProcessingError::MalformedResponse("no label".to_string()).into();
        assert!(matches!(err, tagasuri_core::Error::MalformedResponse(_)));

        let err: tagasuri_core::Error =
            TextProcessingError::InvalidInput("empty".to_string()).into();
        match err {
            tagasuri_core::Error::TextProcessing(msg) => assert!(msg.contains("empty")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
