//! Domain layer for the Flashcards domain

pub mod entities;
