//! Route definitions for Notes domain API

use axum::{routing::get, Router};

use super::handlers::notes;
use super::middleware::NotesState;

/// Create all Notes domain API routes
pub fn routes() -> Router<NotesState> {
    Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
}
