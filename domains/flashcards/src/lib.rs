//! Flashcards domain: study flashcards CRUD

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Flashcard, NewFlashcard, MAX_CONTENT_LENGTH};

// Re-export repository types
pub use repository::FlashcardRepository;

// Re-export API types
pub use api::routes;
pub use api::FlashcardsState;
