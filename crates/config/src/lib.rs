//! Configuration management for the grammar checker
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`TAGASURI__` prefix, `__` separator)
//! - `PORT` and `OPENAI_API_KEY`, read directly
//!
//! Word lists and the affix rule table are loaded from the paths under
//! `filters`, or from the built-in lists when a path is unset.

pub mod constants;
pub mod lexicon;
pub mod prompts;
pub mod settings;

pub use lexicon::{
    builtin_lexicon, default_affix_rules, load_affix_rules, load_lexicon, load_word_list,
};
pub use settings::{
    load_settings, load_settings_from_dir, FilterSettings, LlmProvider, LlmSettings,
    ObservabilityConfig, RelaySettings, RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for tagasuri_core::Error {
    fn from(err: ConfigError) -> Self {
        tagasuri_core::Error::Config(err.to_string())
    }
}
