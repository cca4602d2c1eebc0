//! HTTP handlers for the Flashcards domain

pub mod flashcards;
