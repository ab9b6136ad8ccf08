//! Grammar relay
//!
//! The grammar analysis itself is done by a language model. This module
//! builds the request, classifies the reply and parses its labelled lines.

mod llm_checker;
mod verdict;

pub use llm_checker::LlmGrammarChecker;
pub use verdict::{parse_verdict, GrammarVerdict};

use std::sync::Arc;
use tagasuri_core::{GrammarChecker, LanguageModel};

/// Relay configuration
#[derive(Debug, Clone)]
pub struct LlmCheckerConfig {
    /// Instruction prompt sent as the system message
    pub system_prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Replies meaning "nothing to correct", compared case-insensitively
    pub no_error_markers: Vec<String>,
}

impl LlmCheckerConfig {
    /// Deterministic sampling, 200 output tokens, `walang mali` as the only marker
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            temperature: 0.0,
            max_tokens: 200,
            no_error_markers: vec!["walang mali".to_string()],
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_no_error_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.no_error_markers = markers.into_iter().map(Into::into).collect();
        self
    }
}

/// Create the grammar checker for a language model
pub fn create_checker(
    config: LlmCheckerConfig,
    llm: Arc<dyn LanguageModel>,
) -> Arc<dyn GrammarChecker> {
    tracing::debug!(
        model = llm.model_name(),
        max_tokens = config.max_tokens,
        "Creating LLM grammar checker"
    );
    Arc::new(LlmGrammarChecker::new(llm, config))
}
