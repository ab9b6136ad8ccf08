//! Application State
//!
//! Shared state across all handlers. Everything is built once at startup
//! and read-only afterwards.

use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;

use tagasuri_config::{load_lexicon, Settings};
use tagasuri_core::{LanguageModel, Lexicon};
use tagasuri_llm::LlmFactory;
use tagasuri_text_processing::{
    create_checker, LlmCheckerConfig, PipelineConfig, TextProcessingPipeline,
};

use crate::ServerError;

/// Word-list sizes reported by the health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexiconStats {
    pub native: usize,
    pub foreign: usize,
    pub disallowed: usize,
    pub affix_rules: usize,
}

impl From<&Lexicon> for LexiconStats {
    fn from(lexicon: &Lexicon) -> Self {
        Self {
            native: lexicon.native.len(),
            foreign: lexicon.foreign.len(),
            disallowed: lexicon.disallowed.len(),
            affix_rules: lexicon.affixes.len(),
        }
    }
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub pipeline: Arc<TextProcessingPipeline>,
    /// Grammar model, kept for readiness probes
    pub llm: Arc<dyn LanguageModel>,
    pub lexicon: LexiconStats,
    /// Prometheus handle; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from settings, an already loaded lexicon and a language model
    pub fn new(config: Settings, lexicon: Lexicon, llm: Arc<dyn LanguageModel>) -> Self {
        let stats = LexiconStats::from(&lexicon);
        let checker = create_checker(checker_config(&config), llm.clone());
        let pipeline = TextProcessingPipeline::new(pipeline_config(&config), lexicon, checker);

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            llm,
            lexicon: stats,
            metrics: None,
        }
    }

    /// Load word lists and create the language model named in the settings
    pub fn from_settings(config: Settings) -> Result<Self, ServerError> {
        let lexicon = load_lexicon(&config.filters)?;
        let llm = LlmFactory::create(&config.llm)?;
        Ok(Self::new(config, lexicon, llm))
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

fn pipeline_config(config: &Settings) -> PipelineConfig {
    let filters = &config.filters;
    PipelineConfig {
        min_native_ratio: filters.min_native_ratio,
        min_native_tokens: filters.min_native_tokens,
        extra_native_prefixes: filters.extra_native_prefixes.clone(),
        mask_token: filters.mask_token.clone(),
        profanity_action: filters.profanity_action,
        capitalization_action: filters.capitalization_action,
        messages: config.messages.clone(),
    }
}

fn checker_config(config: &Settings) -> LlmCheckerConfig {
    LlmCheckerConfig::new(config.relay.system_prompt.as_str())
        .with_temperature(config.llm.temperature)
        .with_max_tokens(config.llm.max_tokens)
        .with_no_error_markers(config.relay.no_error_markers.iter().cloned())
}
