//! LLM Factory
//!
//! Builds the language model named by `LlmSettings`.
//!
//! ## Supported Providers
//! - **OpenAI**: api.openai.com, `OPENAI_API_KEY`
//! - **Azure**: Azure OpenAI deployment, `api-key` header
//! - **Local**: OpenAI-compatible servers (Ollama, vLLM), no key
//!
//! ## Example
//! ```ignore
//! let llm = LlmFactory::create(&settings.llm)?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tagasuri_config::{LlmProvider, LlmSettings};
use tagasuri_core::LanguageModel;

use crate::{
    adapter::LanguageModelAdapter,
    backend::{LlmBackend, OpenAIBackend, OpenAIConfig},
    LlmError,
};

/// Factory for creating LLM backends
pub struct LlmFactory;

impl LlmFactory {
    /// Create a LanguageModel from settings (implements core trait)
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LanguageModel>, LlmError> {
        let backend = Self::create_backend(settings)?;
        tracing::info!(
            provider = ?settings.provider,
            model = %settings.model,
            endpoint = %settings.endpoint,
            "Language model ready"
        );
        Ok(Arc::new(LanguageModelAdapter::from_arc(backend)))
    }

    /// Create a raw LlmBackend (for low-level access)
    pub fn create_backend(settings: &LlmSettings) -> Result<Arc<dyn LlmBackend>, LlmError> {
        let config = Self::openai_config(settings)?;
        Ok(Arc::new(OpenAIBackend::new(config)?))
    }

    fn openai_config(settings: &LlmSettings) -> Result<OpenAIConfig, LlmError> {
        let config = match settings.provider {
            LlmProvider::OpenAi => {
                let api_key = Self::api_key(settings);
                OpenAIConfig {
                    endpoint: settings.endpoint.clone(),
                    ..OpenAIConfig::openai(api_key, &settings.model)
                }
            }
            LlmProvider::Azure => {
                let api_key = Self::api_key(settings);
                OpenAIConfig::azure(
                    &settings.endpoint,
                    api_key,
                    &settings.model,
                    &settings.api_version,
                )
            }
            LlmProvider::Local => {
                let mut config = OpenAIConfig::local(&settings.endpoint, &settings.model);
                if let Some(key) = Self::configured_key(settings) {
                    config.api_key = key;
                }
                config
            }
        };

        Ok(config
            .with_max_tokens(settings.max_tokens)
            .with_temperature(settings.temperature)
            .with_timeout(Duration::from_secs(settings.timeout_seconds))
            .with_organization(settings.organization.clone()))
    }

    /// Key for a provider that needs one; empty when unset so calls fail per request
    fn api_key(settings: &LlmSettings) -> String {
        Self::configured_key(settings).unwrap_or_else(|| {
            tracing::warn!(
                provider = ?settings.provider,
                "No API key configured; model calls will fail"
            );
            String::new()
        })
    }

    fn configured_key(settings: &LlmSettings) -> Option<String> {
        settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}
