//! Flashquiz LLM Service
//!
//! Provider-neutral completion API used by the quiz engine:
//! - Google Gemini (`generateContent`) for production
//! - Anthropic Messages API as an alternative provider
//! - Deterministic mock for tests and local development

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anthropic;
pub mod gemini;
pub mod mock;

const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM rate limit exceeded")]
    RateLimit,

    #[error("LLM provider returned {status}: {message}")]
    Server { status: u16, message: String },
}

impl LlmError {
    /// Whether the same request may succeed if sent again.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::RateLimit | LlmError::Request(_) => true,
            LlmError::Server { status, .. } => *status >= 500,
            LlmError::Configuration(_) | LlmError::Response(_) => false,
        }
    }
}

/// Speaker of a message sent to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}

/// Provider-neutral completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier; empty means the provider default
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// A request made of a system instruction and one user prompt.
    pub fn single_turn(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            system_prompt: Some(system_prompt.into()),
            messages: vec![LlmMessage::user(user_prompt)],
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResponse {
    /// Concatenated text of the reply; may be empty
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// LLM service configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider name (gemini, anthropic, mock)
    pub provider: String,
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: u32,
    /// Override for the provider endpoint (proxies, fakes in tests)
    pub base_url: Option<String>,
    pub request_timeout: Duration,
}

impl LlmConfig {
    /// Create LLM config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "gemini".to_string())
            .to_ascii_lowercase();

        let provider_key_var = match provider.as_str() {
            "gemini" => Some("GEMINI_API_KEY"),
            "anthropic" => Some("ANTHROPIC_API_KEY"),
            _ => None,
        };

        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .or_else(|| provider_key_var.and_then(|var| std::env::var(var).ok()))
            .unwrap_or_default();

        if api_key.is_empty() && provider != "mock" {
            return Err(LlmError::Configuration(format!(
                "LLM_API_KEY{} is required for provider {}",
                provider_key_var
                    .map(|v| format!(" or {v}"))
                    .unwrap_or_default(),
                provider
            )));
        }

        let default_model = std::env::var("LLM_MODEL").unwrap_or_else(|_| {
            match provider.as_str() {
                "anthropic" => anthropic::DEFAULT_MODEL,
                "mock" => mock::MOCK_MODEL,
                _ => gemini::DEFAULT_MODEL,
            }
            .to_string()
        });

        let max_tokens = parse_env("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let timeout_secs = parse_env("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            provider,
            api_key,
            default_model,
            max_tokens,
            base_url: std::env::var("LLM_BASE_URL").ok(),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config for the mock provider
    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            default_model: mock::MOCK_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, default: T) -> Result<T, LlmError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| LlmError::Configuration(format!("{var} has an invalid value: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

/// Build the shared reqwest client for HTTP providers
pub(crate) fn http_client(config: &LlmConfig) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success provider status onto an `LlmError`
pub(crate) fn error_for_status(status: reqwest::StatusCode, message: String) -> LlmError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return LlmError::RateLimit;
    }
    LlmError::Server {
        status: status.as_u16(),
        message,
    }
}

/// LLM service trait for different providers
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Generate a completion for the request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when the request leaves `model` empty
    fn default_model(&self) -> &str;
}

/// LLM service factory
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create LLM service based on configuration
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "gemini" | "google" => {
                tracing::info!(model = %config.default_model, "Creating Gemini LLM service");
                Ok(Box::new(gemini::GeminiService::new(config)?))
            }
            "anthropic" | "claude" => {
                tracing::info!(model = %config.default_model, "Creating Anthropic LLM service");
                Ok(Box::new(anthropic::AnthropicService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: gemini, anthropic, mock",
                provider
            ))),
        }
    }
}
