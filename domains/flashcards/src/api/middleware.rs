//! Flashcards domain state

use crate::FlashcardRepository;

/// Application state for the Flashcards domain
#[derive(Clone)]
pub struct FlashcardsState {
    pub flashcards: FlashcardRepository,
}
