//! Quiz API handlers

use axum::{extract::State, Json};
use flashquiz_common::{Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::QuizState;
use crate::domain::entities::Message;

/// Longest conversation accepted in one request
pub const MAX_CONVERSATION_MESSAGES: u64 = 256;

/// Request for the next quiz turn
#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    /// Conversation so far; absent means the quiz is starting
    #[serde(default)]
    #[validate(length(
        max = MAX_CONVERSATION_MESSAGES,
        message = "conversation cannot exceed 256 messages"
    ))]
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub messages: Vec<Message>,
}

/// Run one quiz turn over the caller's conversation
pub async fn generate_quiz_turn(
    State(state): State<QuizState>,
    ValidatedJson(req): ValidatedJson<QuizRequest>,
) -> Result<Json<QuizResponse>> {
    let incoming = req.messages.len();
    let messages = state.engine.generate_turn(req.messages).await;

    tracing::debug!(incoming, outgoing = messages.len(), "Quiz turn served");
    Ok(Json(QuizResponse { messages }))
}
