//! Flashcard CRUD integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_flashcard_lifecycle() {
    let app = TestApp::new().await.unwrap();

    let resp = app
        .router()
        .oneshot(json_request(
            Method::POST,
            "/flashcards",
            Some(json!({"content": "Q: Powerhouse of the cell? A: Mitochondria"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = parse_body(resp).await["id"].as_i64().unwrap();
    let uri = format!("/flashcards/{id}");

    let resp = app
        .router()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            Some(json!({"content": "Q: Energy currency? A: ATP"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["content"], "Q: Energy currency? A: ATP");

    let resp = app
        .router()
        .oneshot(json_request(Method::GET, "/flashcards", None))
        .await
        .unwrap();
    assert_eq!(parse_body(resp).await.as_array().map(Vec::len), Some(1));

    let resp = app
        .router()
        .oneshot(json_request(Method::DELETE, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .router()
        .oneshot(json_request(Method::DELETE, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_flashcards_do_not_feed_the_quiz() {
    let app = TestApp::new().await.unwrap();

    let resp = app
        .router()
        .oneshot(json_request(
            Method::POST,
            "/flashcards",
            Some(json!({"content": "Only on a flashcard"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let llm = flashquiz_llm::mock::MockLlmService::with_reply("Question?");
    let resp = app
        .router_with(llm.clone())
        .oneshot(json_request(Method::POST, "/quiz", Some(json!({}))))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let prompt = &llm.recorded_requests()[0].messages[0].content;
    assert!(!prompt.contains("Only on a flashcard"));

    app.cleanup().await.unwrap();
}
