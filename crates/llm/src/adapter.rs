//! Language Model adapter
//!
//! Bridges the LlmBackend trait to the core LanguageModel trait.

use async_trait::async_trait;
use std::sync::Arc;

use tagasuri_core::{
    llm_types::{FinishReason as CoreFinishReason, TokenUsage},
    Error, GenerateRequest, GenerateResponse, LanguageModel, Result,
};

use crate::backend::{FinishReason as BackendFinishReason, GenerationOptions, LlmBackend};
use crate::prompt::Message;

/// Adapter that wraps an LlmBackend to implement the core LanguageModel trait
///
/// # Example
///
/// ```ignore
/// let backend = OpenAIBackend::new(OpenAIConfig::openai(key, "gpt-4o-mini"))?;
/// let llm: Arc<dyn LanguageModel> = Arc::new(LanguageModelAdapter::new(backend));
/// ```
pub struct LanguageModelAdapter {
    backend: Arc<dyn LlmBackend>,
    model_name: String,
}

impl LanguageModelAdapter {
    /// Create a new adapter wrapping an LlmBackend
    pub fn new<B: LlmBackend + 'static>(backend: B) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    /// Create from an Arc'd backend
    pub fn from_arc(backend: Arc<dyn LlmBackend>) -> Self {
        let model_name = backend.model_name().to_string();
        Self {
            backend,
            model_name,
        }
    }

    fn convert_messages(request: &GenerateRequest) -> Vec<Message> {
        request.messages.iter().map(Message::from).collect()
    }

    fn convert_finish_reason(reason: BackendFinishReason) -> CoreFinishReason {
        match reason {
            BackendFinishReason::Stop => CoreFinishReason::Stop,
            BackendFinishReason::Length => CoreFinishReason::Length,
            BackendFinishReason::ContentFilter => CoreFinishReason::ContentFilter,
            BackendFinishReason::Error => CoreFinishReason::Error,
        }
    }
}

#[async_trait]
impl LanguageModel for LanguageModelAdapter {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let messages = Self::convert_messages(&request);
        let options = GenerationOptions {
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        match self.backend.generate(&messages, &options).await {
            Ok(result) => Ok(GenerateResponse {
                text: result.text,
                finish_reason: Self::convert_finish_reason(result.finish_reason),
                usage: Some(TokenUsage::new(result.prompt_tokens, result.completion_tokens)),
            }),
            Err(e) => Err(Error::Llm(format!("LLM generation failed: {}", e))),
        }
    }

    async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenerationResult;
    use crate::LlmError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBackend {
        seen: Mutex<Vec<(Vec<Message>, GenerationOptions)>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmBackend for RecordingBackend {
        async fn generate(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> std::result::Result<GenerationResult, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((messages.to_vec(), *options));
            if self.fail {
                return Err(LlmError::Timeout);
            }
            Ok(GenerationResult {
                text: "  MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.  ".to_string(),
                prompt_tokens: 30,
                completion_tokens: 10,
                total_time_ms: 5,
                finish_reason: BackendFinishReason::Length,
            })
        }

        async fn is_available(&self) -> bool {
            !self.fail
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_adapter_passes_messages_and_options() {
        let backend = Arc::new(RecordingBackend::default());
        let adapter = LanguageModelAdapter::from_arc(backend.clone());
        assert_eq!(adapter.model_name(), "recording");
        assert!(adapter.is_available().await);

        let request = GenerateRequest::new("Ikaw ay isang tagasuri")
            .with_user_message("ako ay masaya.")
            .with_temperature(0.0)
            .with_max_tokens(200);
        let response = adapter.generate(request).await.unwrap();

        // Text is relayed untouched; trimming is the caller's job
        assert!(response.text.starts_with("  MALI"));
        assert_eq!(response.finish_reason, CoreFinishReason::Length);
        assert_eq!(response.usage.unwrap().total_tokens, 40);

        let seen = backend.seen.lock().unwrap();
        let (messages, options) = &seen[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system("Ikaw ay isang tagasuri"));
        assert_eq!(*options, GenerationOptions::new(200, 0.0));
    }

    #[tokio::test]
    async fn test_adapter_maps_errors() {
        let adapter = LanguageModelAdapter::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });
        let err = adapter
            .generate(GenerateRequest::new("s").with_user_message("u"))
            .await
            .unwrap_err();
        match err {
            Error::Llm(msg) => assert!(msg.contains("Timeout")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!adapter.is_available().await);
    }
}
