//! Quiz turn engine
//!
//! One turn: fetch the note corpus, build the prompt, ask the model, append
//! exactly one assistant message. Failures never escape a turn; each one is
//! logged and replaced by a fixed fallback reply.

use std::sync::Arc;
use std::time::Duration;

use flashquiz_llm::{CompletionRequest, CompletionResponse, LlmError, LlmService};
use thiserror::Error;
use tokio::time::{timeout_at, Instant};

use super::corpus::NoteCorpus;
use super::entities::Message;
use super::prompt;
use crate::QuizConfig;

pub const NOTES_UNAVAILABLE_REPLY: &str =
    "Sorry, I was unable to fetch the notes to generate a question.";
pub const GENERATION_FAILED_REPLY: &str =
    "Sorry, I was unable to generate a question at this time.";
pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I couldn't generate a question.";

/// Why a turn fell back to a scripted reply
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("notes unavailable: {0}")]
    NotesUnavailable(String),

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("model returned an empty completion")]
    EmptyCompletion,
}

impl TurnError {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            TurnError::NotesUnavailable(_) => NOTES_UNAVAILABLE_REPLY,
            TurnError::GenerationFailed(_) => GENERATION_FAILED_REPLY,
            TurnError::EmptyCompletion => EMPTY_COMPLETION_REPLY,
        }
    }
}

#[derive(Clone)]
pub struct QuizEngine {
    notes: Arc<dyn NoteCorpus>,
    llm: Arc<dyn LlmService>,
    config: QuizConfig,
}

impl QuizEngine {
    pub fn new(notes: Arc<dyn NoteCorpus>, llm: Arc<dyn LlmService>, config: QuizConfig) -> Self {
        Self { notes, llm, config }
    }

    /// Append the quiz master's next message to `conversation`.
    ///
    /// Never fails: the appended message is either the model's reply or one
    /// of the fallback replies.
    pub async fn generate_turn(&self, mut conversation: Vec<Message>) -> Vec<Message> {
        let reply = match self.next_reply(&conversation).await {
            Ok(reply) => reply,
            Err(e) => {
                if matches!(e, TurnError::EmptyCompletion) {
                    tracing::warn!(messages = conversation.len(), "Model returned no text");
                } else {
                    tracing::error!(messages = conversation.len(), error = %e, "Quiz turn failed");
                }
                e.fallback_message().to_string()
            }
        };

        conversation.push(Message::assistant(reply));
        conversation
    }

    /// Produce the next assistant reply, or the reason none could be made
    pub async fn next_reply(&self, conversation: &[Message]) -> Result<String, TurnError> {
        let deadline = Instant::now() + self.config.turn_timeout;

        let notes = match timeout_at(deadline, self.notes.list_contents()).await {
            Ok(Ok(notes)) => notes,
            Ok(Err(e)) => return Err(TurnError::NotesUnavailable(e.to_string())),
            Err(_) => {
                return Err(TurnError::NotesUnavailable(
                    "note fetch exceeded the turn deadline".to_string(),
                ))
            }
        };

        let request = prompt::completion_request(&notes, conversation, &self.config);
        let response = self
            .complete_with_retry(request, deadline)
            .await
            .map_err(|e| TurnError::GenerationFailed(e.to_string()))?;

        if response.content.is_empty() {
            return Err(TurnError::EmptyCompletion);
        }

        tracing::info!(
            messages = conversation.len(),
            notes = notes.len(),
            model = %response.model,
            output_tokens = response.output_tokens,
            "Quiz turn generated"
        );
        Ok(response.content)
    }

    async fn complete_with_retry(
        &self,
        request: CompletionRequest,
        deadline: Instant,
    ) -> Result<CompletionResponse, LlmError> {
        let mut attempt: u32 = 0;

        loop {
            let result = match timeout_at(deadline, self.llm.complete(request.clone())).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(LlmError::Request(
                        "model call exceeded the turn deadline".to_string(),
                    ))
                }
            };

            let error = match result {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if attempt >= self.config.model_retries || !error.is_transient() {
                return Err(error);
            }

            let delay = backoff_delay(self.config.retry_backoff, attempt);
            if Instant::now() + delay >= deadline {
                tracing::warn!(attempt, error = %error, "No time left to retry model call");
                return Err(error);
            }

            tracing::warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient model failure, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// `base * 2^attempt`, saturating instead of overflowing
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}
