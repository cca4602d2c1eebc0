//! Repository implementations for Notes domain

pub mod notes;

pub use notes::NoteRepository;
