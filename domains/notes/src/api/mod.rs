//! API layer for the Notes domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::NotesState;
pub use routes::routes;
