//! Note API handlers

use axum::{extract::State, http::StatusCode, Json};
use flashquiz_common::{Error, Path, Result, ValidatedJson};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::middleware::NotesState;
use crate::domain::entities::{NewNote, Note};

/// Request for creating a note
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Note body; trimmed before storage
    #[validate(custom(function = "validate_note_content"))]
    pub content: String,
}

/// Request for updating a note
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(custom(function = "validate_note_content"))]
    pub content: Option<String>,
}

fn validate_note_content(content: &str) -> std::result::Result<(), ValidationError> {
    Note::normalize_content(content).map(|_| ()).map_err(|e| {
        let message = match e {
            Error::Validation(message) => message,
            other => other.to_string(),
        };
        ValidationError::new("invalid_content").with_message(message.into())
    })
}

/// Create a new note
pub async fn create_note(
    State(state): State<NotesState>,
    ValidatedJson(req): ValidatedJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<Note>)> {
    let note = NewNote::new(&req.content)?;
    let created = state.notes.create(&note).await?;

    tracing::info!(note_id = created.id, "Note created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all notes, newest first
pub async fn list_notes(State(state): State<NotesState>) -> Result<Json<Vec<Note>>> {
    let notes = state.notes.list_all().await?;

    tracing::debug!(count = notes.len(), "Listed notes");
    Ok(Json(notes))
}

/// Get a single note by ID
pub async fn get_note(
    State(state): State<NotesState>,
    Path(id): Path<i64>,
) -> Result<Json<Note>> {
    Note::validate_id(id)?;

    let note = state.notes.get(id).await?;
    Ok(Json(note))
}

/// Update note content
pub async fn update_note(
    State(state): State<NotesState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateNoteRequest>,
) -> Result<Json<Note>> {
    Note::validate_id(id)?;

    let raw = req.content.ok_or_else(|| {
        Error::Validation("at least one field must be provided for update".to_string())
    })?;
    let content = Note::normalize_content(&raw)?;

    let updated = state.notes.update_content(id, &content).await?;

    tracing::info!(note_id = id, "Note updated");
    Ok(Json(updated))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<NotesState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    Note::validate_id(id)?;

    state.notes.delete(id).await?;

    tracing::info!(note_id = id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
