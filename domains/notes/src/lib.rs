//! Notes domain: study notes CRUD

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{NewNote, Note, MAX_CONTENT_LENGTH};

// Re-export repository types
pub use repository::NoteRepository;

// Re-export API types
pub use api::routes;
pub use api::NotesState;
