//! Google Gemini API Implementation
//!
//! Calls `models/{model}:generateContent` on the Generative Language API.
//! The system prompt goes into `systemInstruction`; assistant turns are sent
//! with Gemini's `model` role.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error_for_status, http_client, CompletionRequest, CompletionResponse, LlmConfig, LlmError,
    LlmRole, LlmService,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: i32,
    #[serde(default)]
    candidates_token_count: i32,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

/// Gemini LLM service implementation
pub struct GeminiService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl GeminiService {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: http_client(&config)?,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl LlmService for GeminiService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };

        let body = GenerateContentRequest {
            system_instruction: request.system_prompt.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: request
                .messages
                .iter()
                .map(|m| Content {
                    role: Some(match m.role {
                        LlmRole::User => "user",
                        LlmRole::Assistant => "model",
                    }),
                    parts: vec![Part { text: &m.content }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            },
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        tracing::debug!(model = %model, temperature = ?request.temperature, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            let message = match serde_json::from_str::<ErrorResponse>(&error_body) {
                Ok(parsed) => format!(
                    "Gemini API error ({}): {}",
                    parsed.error.status.as_deref().unwrap_or("UNKNOWN"),
                    parsed.error.message
                ),
                Err(_) => error_body,
            };

            return Err(error_for_status(status, message));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Response(format!("Failed to parse response: {}", e)))?;

        // Only the first candidate is used; no candidates means an empty reply
        let first = api_response.candidates.into_iter().next();
        let stop_reason = first
            .as_ref()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "STOP".to_string());
        let content = first
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let usage = api_response.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: api_response
                .model_version
                .unwrap_or_else(|| model.to_string()),
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            stop_reason,
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
