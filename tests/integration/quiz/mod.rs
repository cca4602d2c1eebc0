//! Quiz turn integration tests against the real note store

use axum::http::{Method, StatusCode};
use flashquiz_llm::mock::MockLlmService;
use flashquiz_quiz::GENERATION_FAILED_REPLY;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_quiz_prompt_contains_stored_notes_newest_first() {
    let app = TestApp::new().await.unwrap();
    app.seed_note("Paris is the capital of France.").await.unwrap();
    app.seed_note("The Seine flows through Paris.").await.unwrap();

    let llm = MockLlmService::with_reply("What is the capital of France?");
    let resp = app
        .router_with(llm.clone())
        .oneshot(json_request(
            Method::POST,
            "/quiz",
            Some(json!({"messages": []})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(
        body["messages"],
        json!([{"role": "assistant", "content": "What is the capital of France?"}])
    );

    let requests = llm.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].messages[0]
        .content
        .contains("The Seine flows through Paris.\nParis is the capital of France."));

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_quiz_with_no_notes_still_asks_the_model() {
    let app = TestApp::new().await.unwrap();

    let llm = MockLlmService::with_reply("There are no notes to quiz you on yet.");
    let resp = app
        .router_with(llm.clone())
        .oneshot(json_request(Method::POST, "/quiz", Some(json!({}))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(llm.call_count(), 1);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_quiz_model_failure_is_200_with_fallback() {
    let app = TestApp::new().await.unwrap();
    app.seed_note("Photosynthesis happens in chloroplasts.").await.unwrap();

    let conversation = json!([
        {"role": "assistant", "content": "Where does photosynthesis happen?"},
        {"role": "user", "content": "Chloroplasts"}
    ]);
    let resp = app
        .router_with(MockLlmService::failing("upstream down"))
        .oneshot(json_request(
            Method::POST,
            "/quiz",
            Some(json!({ "messages": conversation })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(&messages[..2], conversation.as_array().unwrap().as_slice());
    assert_eq!(messages[2]["content"], GENERATION_FAILED_REPLY);

    app.cleanup().await.unwrap();
}
