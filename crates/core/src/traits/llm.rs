//! Language Model traits

use crate::{GenerateRequest, GenerateResponse, Result};
use async_trait::async_trait;

/// Language Model interface
///
/// Implementations:
/// - `LanguageModelAdapter` - wraps any `LlmBackend` (OpenAI, Azure, local
///   OpenAI-compatible servers)
///
/// # Example
///
/// ```ignore
/// let llm: Arc<dyn LanguageModel> = LlmFactory::create(&settings.llm)?;
/// let request = GenerateRequest::new(prompt)
///     .with_user_message("ako ay masaya.")
///     .with_temperature(0.0)
///     .with_max_tokens(200);
/// let response = llm.generate(request).await?;
/// println!("{}", response.text);
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generate a completion
    ///
    /// The request carries the system prompt, the user text and the
    /// sampling parameters. Failures are returned as-is; callers do not
    /// retry.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Check if the backend is reachable
    async fn is_available(&self) -> bool;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}
