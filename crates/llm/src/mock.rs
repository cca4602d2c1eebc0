//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"` and by tests that
//! need a deterministic model. Replies can be scripted and every request is
//! recorded for assertions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

pub const MOCK_MODEL: &str = "mock-model";

/// One scripted outcome of a mock completion
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Text(String),
    RateLimited,
    Unavailable,
    Failed(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::RateLimited => Err(LlmError::RateLimit),
            MockReply::Unavailable => Err(LlmError::Server {
                status: 503,
                message: "mock provider unavailable".to_string(),
            }),
            MockReply::Failed(message) => Err(LlmError::Response(message)),
        }
    }
}

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    /// Used once the script is exhausted; `None` echoes the last message
    fallback: Option<MockReply>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Mock that echoes the last user message
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that always answers with `text`
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(MockReply::Text(text.into())),
            ..Self::default()
        }
    }

    /// Mock whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: Some(MockReply::Failed(message.into())),
            ..Self::default()
        }
    }

    /// Mock that plays `replies` in order, then echoes
    pub fn scripted(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            script: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Return all recorded requests.
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn next_reply(&self, request: &CompletionRequest) -> Result<MockReply, LlmError> {
        let scripted = self
            .script
            .lock()
            .map_err(|e| LlmError::Request(format!("script lock poisoned: {e}")))?
            .pop_front();

        Ok(scripted.or_else(|| self.fallback.clone()).unwrap_or_else(|| {
            let last_message = request
                .messages
                .last()
                .map(|m| m.content.as_str())
                .unwrap_or("empty");
            MockReply::Text(format!("Mock response to: {}", last_message))
        }))
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::debug!(
            messages = request.messages.len(),
            "Mock LLM service processing completion request"
        );

        self.requests
            .lock()
            .map_err(|e| LlmError::Request(format!("requests lock poisoned: {e}")))?
            .push(request.clone());

        let reply = self.next_reply(&request)?;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = reply.into_result()?;

        let model = if request.model.is_empty() {
            MOCK_MODEL.to_string()
        } else {
            request.model
        };

        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as i32 / 4)
            .sum::<i32>();
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "end_turn".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }
}
