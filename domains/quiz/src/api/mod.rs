//! API layer for the Quiz domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::QuizState;
pub use routes::routes;
