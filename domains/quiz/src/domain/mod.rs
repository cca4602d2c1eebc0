//! Quiz domain model

pub mod corpus;
pub mod engine;
pub mod entities;
pub mod prompt;
