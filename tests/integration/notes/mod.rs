//! Note CRUD integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_create_note_returns_201_with_trimmed_content() {
    let app = TestApp::new().await.unwrap();

    let req = json_request(
        Method::POST,
        "/notes",
        Some(json!({"content": "  Mitochondria produce ATP.  "})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = parse_body(resp).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["content"], "Mitochondria produce ATP.");
    assert_eq!(body["created_at"], body["updated_at"]);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_list_notes_newest_first() {
    let app = TestApp::new().await.unwrap();
    let first = app.seed_note("first").await.unwrap();
    let second = app.seed_note("second").await.unwrap();

    let resp = app
        .router()
        .oneshot(json_request(Method::GET, "/notes", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_get_update_delete_round() {
    let app = TestApp::new().await.unwrap();
    let id = app.seed_note("Water boils at 100C.").await.unwrap();
    let uri = format!("/notes/{id}");

    let resp = app
        .router()
        .oneshot(json_request(Method::GET, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(parse_body(resp).await["content"], "Water boils at 100C.");

    let resp = app
        .router()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            Some(json!({"content": "Water boils at 100C at sea level."})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = parse_body(resp).await;
    assert_eq!(updated["content"], "Water boils at 100C at sea level.");
    assert_ne!(updated["updated_at"], updated["created_at"]);

    let resp = app
        .router()
        .oneshot(json_request(Method::DELETE, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .router()
        .oneshot(json_request(Method::GET, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_missing_note_is_404_for_every_verb() {
    let app = TestApp::new().await.unwrap();

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"content": "anything"}))),
        (Method::DELETE, None),
    ] {
        let resp = app
            .router()
            .oneshot(json_request(method.clone(), "/notes/999999", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method}");
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Not found: note with id 999999 not found");
    }

    app.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
#[serial]
async fn test_content_at_limit_is_accepted() {
    let app = TestApp::new().await.unwrap();
    let content = "é".repeat(255);

    let resp = app
        .router()
        .oneshot(json_request(
            Method::POST,
            "/notes",
            Some(json!({ "content": content })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    app.cleanup().await.unwrap();
}
