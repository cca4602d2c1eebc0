//! Route definitions for Flashcards domain API

use axum::{routing::get, Router};

use super::handlers::flashcards;
use super::middleware::FlashcardsState;

/// Create all Flashcards domain API routes
pub fn routes() -> Router<FlashcardsState> {
    Router::new()
        .route(
            "/flashcards",
            get(flashcards::list_flashcards).post(flashcards::create_flashcard),
        )
        .route(
            "/flashcards/{id}",
            get(flashcards::get_flashcard)
                .put(flashcards::update_flashcard)
                .delete(flashcards::delete_flashcard),
        )
}
