// End-to-end flow through the HTTP surface: publish a work, engage with it,
// read the counters back.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::shell::config::AppConfig;
use crate::shell::http::router;
use crate::shell::state::AppState;

fn app() -> (Router, AppState) {
    let state = AppState::in_memory();
    (router(state.clone()), state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn publish(app: &Router, owner: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post("/works")
                .header("x-viewer-id", owner)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["work_id"]
        .as_str()
        .expect("work_id missing")
        .to_string()
}

#[tokio::test]
async fn it_should_carry_a_work_through_publish_engage_and_count() {
    let (app, _state) = app();
    let work = publish(&app, "author-1").await;

    // A qualified view from an anonymous reader.
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/works/{work}/view"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A repost toggle from an identified reader.
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/works/{work}/engagements/repost"))
                .header("x-viewer-id", "reader-1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"desired_state":true,"caption":"worth a read"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["new_state"], serde_json::json!(true));
    assert_eq!(json["count"], serde_json::json!(1));

    // The owner archives their work; a reader could not (covered in the
    // inbound tests).
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/works/{work}/engagements/archive"))
                .header("x-viewer-id", "author-1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"desired_state":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/works/{work}/counts"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "views": 1,
            "reposts": 1,
            "likes": 0,
            "bookmarks": 0,
            "archived": true,
        })
    );
}

#[tokio::test]
async fn it_should_return_the_displayed_state_to_baseline_after_on_then_off() {
    let (app, _state) = app();
    let work = publish(&app, "author-1").await;

    for (desired, expected_count) in [(true, 1), (false, 0)] {
        let body = format!(r#"{{"desired_state":{desired}}}"#);
        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/works/{work}/engagements/bookmark"))
                    .header("x-viewer-id", "reader-1")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["new_state"], serde_json::json!(desired));
        assert_eq!(json["count"], serde_json::json!(expected_count));
    }
}

#[tokio::test]
async fn it_should_build_the_state_from_environment_config() {
    // Optional .env for local runs; absent in CI.
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    let state = AppState::new(
        std::sync::Arc::new(
            crate::shared::infrastructure::engagement_store::in_memory::InMemoryEngagementStore::new(),
        ),
        config.commit_timeout,
    );
    let work = state.store.insert_work("author-1").await;
    assert!(work.starts_with("work-"));
}
