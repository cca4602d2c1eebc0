//! API layer for the Flashcards domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::FlashcardsState;
pub use routes::routes;
