//! LLM backend implementations
//!
//! One backend: the OpenAI chat-completions protocol, which also covers
//! Azure OpenAI deployments and local OpenAI-compatible servers (Ollama,
//! vLLM). Each call is a single non-streaming request with no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::prompt::Message;
use crate::LlmError;

/// Per-call sampling overrides; `None` falls back to the backend config
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
        }
    }
}

/// LLM generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text, untrimmed
    pub text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    /// Total generation time (ms)
    pub total_time_ms: u64,
    pub finish_reason: FinishReason,
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    fn from_api(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        }
    }
}

/// LLM Backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response
    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<GenerationResult, LlmError>;

    /// Check if model is available
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Configuration for OpenAI-compatible backends
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API endpoint (OpenAI: https://api.openai.com/v1, Azure: resource URL)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Model name, or deployment name for Azure
    pub model: String,
    /// Default maximum tokens to generate
    pub max_tokens: u32,
    /// Default temperature (0-2)
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
    /// Organization ID (OpenAI specific)
    pub organization: Option<String>,
    /// Azure API version (Azure specific)
    pub api_version: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 200,
            temperature: 0.0,
            timeout: Duration::from_secs(30),
            organization: None,
            api_version: None,
        }
    }
}

impl OpenAIConfig {
    /// Create config for OpenAI
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create config for Azure OpenAI
    pub fn azure(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: deployment.into(),
            api_version: Some(api_version.into()),
            ..Default::default()
        }
    }

    /// Create config for a local OpenAI-compatible server (vLLM, Ollama, etc.)
    pub fn local(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: "not-needed".to_string(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }
}

/// OpenAI-compatible backend
///
/// Works with:
/// - OpenAI (gpt-4o-mini and friends)
/// - Azure OpenAI
/// - vLLM, Ollama and other local servers with OpenAI-compatible APIs
pub struct OpenAIBackend {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIBackend {
    /// Create new OpenAI backend
    ///
    /// An empty API key is accepted here; every call then fails with
    /// [`LlmError::Configuration`].
    pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Get the full API URL for chat completions
    fn chat_url(&self) -> String {
        if let Some(ref api_version) = self.config.api_version {
            // Azure format: {endpoint}/openai/deployments/{model}/chat/completions?api-version={version}
            format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.config.endpoint.trim_end_matches('/'),
                self.config.model,
                api_version
            )
        } else {
            format!(
                "{}/chat/completions",
                self.config.endpoint.trim_end_matches('/')
            )
        }
    }

    /// Build request headers
    fn build_headers(&self) -> reqwest::header::HeaderMap {
        use reqwest::header::HeaderValue;

        let mut headers = reqwest::header::HeaderMap::new();

        if self.config.api_version.is_some() {
            // Azure uses api-key header
            if let Ok(val) = HeaderValue::from_str(&self.config.api_key) {
                headers.insert("api-key", val);
            }
        } else {
            let auth_value = format!("Bearer {}", self.config.api_key);
            if let Ok(val) = HeaderValue::from_str(&auth_value) {
                headers.insert(reqwest::header::AUTHORIZATION, val);
            }
        }

        if let Some(ref org) = self.config.organization {
            if let Ok(val) = HeaderValue::from_str(org) {
                headers.insert("openai-organization", val);
            }
        }

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        headers
    }

    fn build_request(&self, messages: &[Message], options: &GenerationOptions) -> OpenAIChatRequest {
        OpenAIChatRequest {
            // Azure takes the deployment from the URL
            model: self
                .config
                .api_version
                .is_none()
                .then(|| self.config.model.clone()),
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
            max_tokens: Some(options.max_tokens.unwrap_or(self.config.max_tokens)),
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
            stream: Some(false),
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAIBackend {
    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<GenerationResult, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::Configuration("No API key configured".to_string()));
        }

        let start = Instant::now();
        let request = self.build_request(messages, options);

        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            max_tokens = ?request.max_tokens,
            temperature = ?request.temperature,
            "Sending chat completion"
        );

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.build_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        let (prompt_tokens, completion_tokens) = response
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(GenerationResult {
            text: choice.message.content.unwrap_or_default(),
            prompt_tokens,
            completion_tokens,
            total_time_ms: start.elapsed().as_millis() as u64,
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
        })
    }

    async fn is_available(&self) -> bool {
        if self.config.api_key.is_empty() {
            return false;
        }
        if self.config.api_version.is_none() {
            let url = format!("{}/models", self.config.endpoint.trim_end_matches('/'));
            self.client
                .get(&url)
                .headers(self.build_headers())
                .timeout(Duration::from_secs(5))
                .send()
                .await
                .map(|r| r.status().is_success())
                .unwrap_or(false)
        } else {
            // Azure has no deployment-agnostic probe
            true
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
