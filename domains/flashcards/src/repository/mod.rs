//! Repository implementations for Flashcards domain

pub mod flashcards;

pub use flashcards::FlashcardRepository;
