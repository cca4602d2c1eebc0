//! Quiz domain: note-grounded conversational quiz turns
//!
//! A quiz turn takes the caller's conversation, grounds a prompt in the
//! current note corpus, asks the model for the next quiz master message and
//! returns the conversation with that message appended. Nothing is stored
//! between turns; the caller resends the whole conversation every time.

pub mod api;
pub mod config;
pub mod domain;

pub use config::QuizConfig;
pub use domain::corpus::{CorpusError, NoteCorpus, StaticCorpus};
pub use domain::engine::{
    QuizEngine, TurnError, EMPTY_COMPLETION_REPLY, GENERATION_FAILED_REPLY,
    NOTES_UNAVAILABLE_REPLY,
};
pub use domain::entities::{Message, Role};

pub use api::routes;
pub use api::QuizState;
