//! Flashquiz application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use flashquiz_flashcards::{FlashcardRepository, FlashcardsState};
use flashquiz_llm::LlmService;
use flashquiz_notes::{NoteRepository, NotesState};
use flashquiz_quiz::{QuizConfig, QuizEngine, QuizState};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Largest request body accepted by any route
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all domain routes
pub fn create_app(pool: PgPool, llm: Arc<dyn LlmService>, quiz_config: QuizConfig) -> Router {
    let notes = NoteRepository::new(pool.clone());
    let flashcards = FlashcardRepository::new(pool);

    let engine = QuizEngine::new(Arc::new(notes.clone()), llm, quiz_config);

    Router::new()
        .route("/health", get(health_check))
        .merge(flashquiz_notes::routes().with_state(NotesState { notes }))
        .merge(flashquiz_flashcards::routes().with_state(FlashcardsState { flashcards }))
        .merge(flashquiz_quiz::routes().with_state(QuizState { engine }))
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// CORS layer from a comma separated origin list; `*` allows any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<&str> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use flashquiz_llm::mock::MockLlmService;
    use tower::ServiceExt;

    fn app() -> Router {
        let pool = PgPool::connect_lazy("postgres://flashquiz@localhost/unused").unwrap();
        create_app(pool, Arc::new(MockLlmService::new()), QuizConfig::default())
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/decks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let app = app().layer(body_limit_layer());
        let payload = format!(r#"{{"content": "{}"}}"#, "x".repeat(MAX_BODY_BYTES));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/notes")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin() {
        let app = app().layer(build_cors_layer(
            "http://localhost:3000, https://flashquiz.example",
        ));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://flashquiz.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://flashquiz.example"
        );
    }

    #[tokio::test]
    async fn test_cors_omits_header_for_unlisted_origin() {
        let app = app().layer(build_cors_layer("http://localhost:3000"));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_wildcard_is_permissive() {
        let app = app().layer(build_cors_layer("*"));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "https://anywhere.example")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
