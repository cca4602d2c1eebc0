//! Flashcard API handlers

use axum::{extract::State, http::StatusCode, Json};
use flashquiz_common::{Error, Path, Result, ValidatedJson};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::middleware::FlashcardsState;
use crate::domain::entities::{Flashcard, NewFlashcard};

/// Request for creating a flashcard
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFlashcardRequest {
    /// Flashcard body; trimmed before storage
    #[validate(custom(function = "validate_flashcard_content"))]
    pub content: String,
}

/// Request for updating a flashcard
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFlashcardRequest {
    #[validate(custom(function = "validate_flashcard_content"))]
    pub content: Option<String>,
}

fn validate_flashcard_content(content: &str) -> std::result::Result<(), ValidationError> {
    Flashcard::normalize_content(content).map(|_| ()).map_err(|e| {
        let message = match e {
            Error::Validation(message) => message,
            other => other.to_string(),
        };
        ValidationError::new("invalid_content").with_message(message.into())
    })
}

/// Create a new flashcard
pub async fn create_flashcard(
    State(state): State<FlashcardsState>,
    ValidatedJson(req): ValidatedJson<CreateFlashcardRequest>,
) -> Result<(StatusCode, Json<Flashcard>)> {
    let flashcard = NewFlashcard::new(&req.content)?;
    let created = state.flashcards.create(&flashcard).await?;

    tracing::info!(flashcard_id = created.id, "Flashcard created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all flashcards, newest first
pub async fn list_flashcards(
    State(state): State<FlashcardsState>,
) -> Result<Json<Vec<Flashcard>>> {
    let flashcards = state.flashcards.list_all().await?;

    tracing::debug!(count = flashcards.len(), "Listed flashcards");
    Ok(Json(flashcards))
}

/// Get a single flashcard by ID
pub async fn get_flashcard(
    State(state): State<FlashcardsState>,
    Path(id): Path<i64>,
) -> Result<Json<Flashcard>> {
    Flashcard::validate_id(id)?;

    let flashcard = state.flashcards.get(id).await?;
    Ok(Json(flashcard))
}

/// Update flashcard content
pub async fn update_flashcard(
    State(state): State<FlashcardsState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateFlashcardRequest>,
) -> Result<Json<Flashcard>> {
    Flashcard::validate_id(id)?;

    let raw = req.content.ok_or_else(|| {
        Error::Validation("at least one field must be provided for update".to_string())
    })?;
    let content = Flashcard::normalize_content(&raw)?;

    let updated = state.flashcards.update_content(id, &content).await?;

    tracing::info!(flashcard_id = id, "Flashcard updated");
    Ok(Json(updated))
}

/// Delete a flashcard
pub async fn delete_flashcard(
    State(state): State<FlashcardsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    Flashcard::validate_id(id)?;

    state.flashcards.delete(id).await?;

    tracing::info!(flashcard_id = id, "Flashcard deleted");
    Ok(StatusCode::NO_CONTENT)
}
