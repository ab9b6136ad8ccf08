//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use tagasuri_core::{CapitalizationAction, ProfanityAction, RejectionMessages};

use crate::constants::{endpoints, filters, llm, server};
use crate::prompts;
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion backend
    #[serde(default)]
    pub llm: LlmSettings,

    /// Prompt and reply interpretation
    #[serde(default)]
    pub relay: RelaySettings,

    /// Pre-filter pipeline
    #[serde(default)]
    pub filters: FilterSettings,

    /// Fixed rejection messages
    #[serde(default)]
    pub messages: RejectionMessages,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_llm()?;
        self.validate_relay()?;
        self.validate_filters()?;
        self.validate_messages()?;

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        // The model call must time out before the router does
        if self.server.timeout_seconds <= self.llm.timeout_seconds {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: format!(
                    "Must exceed llm.timeout_seconds ({}), got {}",
                    self.llm.timeout_seconds, self.server.timeout_seconds
                ),
            });
        }

        if self.environment.is_production()
            && self.server.cors_enabled
            && self.server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 Any origin will be accepted."
            );
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        let llm = &self.llm;

        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", llm.temperature),
            });
        }

        if llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_tokens".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if llm.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField("llm.model".to_string()));
        }

        if llm.provider == LlmProvider::Azure && llm.endpoint == endpoints::OPENAI_DEFAULT {
            return Err(ConfigError::InvalidValue {
                field: "llm.endpoint".to_string(),
                message: "Azure requires the resource endpoint".to_string(),
            });
        }

        let has_key = llm.api_key.as_deref().is_some_and(|key| !key.trim().is_empty());
        if llm.provider.requires_api_key() && !has_key {
            if self.environment.is_strict() {
                return Err(ConfigError::MissingField("llm.api_key".to_string()));
            }
            tracing::warn!(
                provider = ?llm.provider,
                "No API key configured (set OPENAI_API_KEY); model calls will fail"
            );
        }

        Ok(())
    }

    fn validate_relay(&self) -> Result<(), ConfigError> {
        if self.relay.system_prompt.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "relay.system_prompt".to_string(),
                message: "Prompt cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_filters(&self) -> Result<(), ConfigError> {
        let filters = &self.filters;

        if !(0.0..=1.0).contains(&filters.min_native_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "filters.min_native_ratio".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    filters.min_native_ratio
                ),
            });
        }

        if filters.mask_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "filters.mask_token".to_string(),
                message: "Mask token cannot be blank".to_string(),
            });
        }

        let paths = [
            ("filters.native_words_path", &filters.native_words_path),
            ("filters.foreign_words_path", &filters.foreign_words_path),
            ("filters.disallowed_words_path", &filters.disallowed_words_path),
            ("filters.affix_rules_path", &filters.affix_rules_path),
        ];
        for (field, path) in paths {
            if let Some(path) = path {
                if !Path::new(path).is_file() {
                    return Err(ConfigError::FileNotFound(format!("{} = {}", field, path)));
                }
            }
        }

        Ok(())
    }

    fn validate_messages(&self) -> Result<(), ConfigError> {
        let messages = [
            ("messages.empty_input", &self.messages.empty_input),
            ("messages.profanity", &self.messages.profanity),
            ("messages.foreign_language", &self.messages.foreign_language),
            ("messages.repetition", &self.messages.repetition),
        ];
        for (field, message) in messages {
            if message.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Message cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port (`PORT` env var, else 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_server_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

fn default_server_timeout() -> u64 {
    server::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_server_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Which chat-completion flavour to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// api.openai.com
    #[default]
    OpenAi,
    /// Azure OpenAI deployment
    Azure,
    /// Local OpenAI-compatible server (Ollama, vLLM)
    Local,
}

impl LlmProvider {
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

/// Chat-completion backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Base URL; for Azure the resource endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API key (`OPENAI_API_KEY` env var)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Model name; for Azure the deployment name
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-call timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub organization: Option<String>,

    /// Azure API version
    #[serde(default = "default_azure_api_version")]
    pub api_version: String,
}

fn default_llm_endpoint() -> String {
    endpoints::OPENAI_DEFAULT.to_string()
}

fn default_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

fn default_model() -> String {
    llm::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    llm::DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    llm::DEFAULT_MAX_TOKENS
}

fn default_llm_timeout() -> u64 {
    llm::DEFAULT_TIMEOUT_SECS
}

fn default_azure_api_version() -> String {
    llm::DEFAULT_AZURE_API_VERSION.to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            endpoint: default_llm_endpoint(),
            api_key: default_api_key(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
            organization: None,
            api_version: default_azure_api_version(),
        }
    }
}

/// Prompt and reply interpretation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Whole-reply markers meaning "no error" (case-insensitive)
    #[serde(default = "default_no_error_markers")]
    pub no_error_markers: Vec<String>,
}

fn default_system_prompt() -> String {
    prompts::GRAMMAR_CHECK_PROMPT.to_string()
}

fn default_no_error_markers() -> Vec<String> {
    prompts::NO_ERROR_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            no_error_markers: default_no_error_markers(),
        }
    }
}

/// Pre-filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Filipino function words; built-in list when unset
    #[serde(default)]
    pub native_words_path: Option<String>,

    /// English terms; built-in list when unset
    #[serde(default)]
    pub foreign_words_path: Option<String>,

    /// Disallowed terms; built-in list when unset
    #[serde(default)]
    pub disallowed_words_path: Option<String>,

    /// YAML affix rule table; built-in table when unset
    #[serde(default)]
    pub affix_rules_path: Option<String>,

    #[serde(default = "default_min_native_ratio")]
    pub min_native_ratio: f32,

    #[serde(default = "default_min_native_tokens")]
    pub min_native_tokens: usize,

    /// Prefixes counted as Filipino by the language gate, on top of the
    /// affix table
    #[serde(default = "default_extra_native_prefixes")]
    pub extra_native_prefixes: Vec<String>,

    #[serde(default = "default_mask_token")]
    pub mask_token: String,

    #[serde(default)]
    pub profanity_action: ProfanityAction,

    #[serde(default)]
    pub capitalization_action: CapitalizationAction,
}

fn default_min_native_ratio() -> f32 {
    filters::MIN_NATIVE_RATIO
}

fn default_min_native_tokens() -> usize {
    filters::MIN_NATIVE_TOKENS
}

fn default_extra_native_prefixes() -> Vec<String> {
    filters::EXTRA_NATIVE_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_mask_token() -> String {
    filters::MASK_TOKEN.to_string()
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            native_words_path: None,
            foreign_words_path: None,
            disallowed_words_path: None,
            affix_rules_path: None,
            min_native_ratio: default_min_native_ratio(),
            min_native_tokens: default_min_native_tokens(),
            extra_native_prefixes: default_extra_native_prefixes(),
            mask_token: default_mask_token(),
            profanity_action: ProfanityAction::default(),
            capitalization_action: CapitalizationAction::default(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable the Prometheus endpoint
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` in the working directory
///
/// Priority: `TAGASURI__*` environment > `config/{env}.yaml` >
/// `config/default.yaml` > built-in defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from_dir("config", env)
}

/// Load settings from a config directory
pub fn load_settings_from_dir(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("TAGASURI")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.temperature, 0.0);
        assert_eq!(settings.llm.max_tokens, 200);
        assert_eq!(settings.filters.min_native_ratio, 0.40);
        assert_eq!(settings.filters.min_native_tokens, 1);
        assert_eq!(settings.filters.mask_token, "****");
        assert_eq!(settings.filters.profanity_action, ProfanityAction::Reject);
        assert_eq!(
            settings.filters.capitalization_action,
            CapitalizationAction::Report
        );
        assert!(settings.relay.system_prompt.contains("TAMANG SAGOT"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        // Port cannot be 0
        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 3000;
        assert!(settings.validate_server().is_ok());

        settings.server.timeout_seconds = 0;
        assert!(settings.validate_server().is_err());
    }

    #[test]
    fn test_server_timeout_exceeds_llm_timeout() {
        let mut settings = Settings::default();
        assert!(settings.server.timeout_seconds > settings.llm.timeout_seconds);
        assert!(settings.validate_server().is_ok());

        settings.server.timeout_seconds = settings.llm.timeout_seconds;
        assert!(matches!(
            settings.validate_server(),
            Err(ConfigError::InvalidValue { .. })
        ));

        settings.llm.timeout_seconds = 10;
        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_llm_validation() {
        let mut settings = Settings::default();

        settings.llm.temperature = 2.5;
        assert!(settings.validate_llm().is_err());
        settings.llm.temperature = -0.1;
        assert!(settings.validate_llm().is_err());
        settings.llm.temperature = 0.0;

        settings.llm.max_tokens = 0;
        assert!(settings.validate_llm().is_err());
        settings.llm.max_tokens = 200;

        settings.llm.model = "  ".to_string();
        assert!(settings.validate_llm().is_err());
    }

    #[test]
    fn test_api_key_required_in_production() {
        let mut settings = Settings::default();
        settings.llm.api_key = None;
        assert!(settings.validate_llm().is_ok());

        settings.environment = RuntimeEnvironment::Production;
        assert!(matches!(
            settings.validate_llm(),
            Err(ConfigError::MissingField(_))
        ));

        settings.llm.provider = LlmProvider::Local;
        settings.llm.endpoint = endpoints::OLLAMA_OPENAI_COMPAT.to_string();
        assert!(settings.validate_llm().is_ok());
    }

    #[test]
    fn test_azure_needs_endpoint() {
        let mut settings = Settings::default();
        settings.llm.provider = LlmProvider::Azure;
        assert!(settings.validate_llm().is_err());

        settings.llm.endpoint = "https://tagasuri.openai.azure.com".to_string();
        settings.llm.api_key = Some("key".to_string());
        assert!(settings.validate_llm().is_ok());
    }

    #[test]
    fn test_filter_validation() {
        let mut settings = Settings::default();

        settings.filters.min_native_ratio = 1.5;
        assert!(settings.validate_filters().is_err());
        settings.filters.min_native_ratio = -0.1;
        assert!(settings.validate_filters().is_err());
        settings.filters.min_native_ratio = 0.4;

        settings.filters.mask_token = " ".to_string();
        assert!(settings.validate_filters().is_err());
        settings.filters.mask_token = "###".to_string();

        settings.filters.disallowed_words_path = Some("/nonexistent/bawal.txt".to_string());
        assert!(matches!(
            settings.validate_filters(),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let mut settings = Settings::default();
        settings.relay.system_prompt = "\n".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut settings = Settings::default();
        settings.messages.profanity = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_dir_layers_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 4000\nfilters:\n  min_native_ratio: 0.5\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "environment: development\nfilters:\n  profanity_action: censor\n  mask_token: \"[bawal]\"\n",
        )
        .unwrap();

        let settings = load_settings_from_dir(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.filters.min_native_ratio, 0.5);
        assert_eq!(settings.filters.profanity_action, ProfanityAction::Censor);
        assert_eq!(settings.filters.mask_token, "[bawal]");
        assert_eq!(settings.llm.max_tokens, 200);
    }

    #[test]
    fn test_load_from_dir_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "llm:\n  temperature: 3.0\n",
        )
        .unwrap();

        let result = load_settings_from_dir(dir.path(), None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings_from_dir(dir.path(), None).unwrap();
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert!(settings.filters.native_words_path.is_none());
    }
}
