//! Route definitions for Quiz domain API

use axum::{routing::post, Router};

use super::handlers::quiz;
use super::middleware::QuizState;

/// Create all Quiz domain API routes
pub fn routes() -> Router<QuizState> {
    Router::new().route("/quiz", post(quiz::generate_quiz_turn))
}
