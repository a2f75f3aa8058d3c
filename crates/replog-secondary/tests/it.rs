use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use clap::Parser;
use replog_core::{Log, MessagesResponse, ReplicateRequest, ReplicationBlock};
use replog_secondary::config;
use replog_secondary::routes;
use replog_secondary::state::SecondaryState;
use tower::ServiceExt;

fn fresh_app() -> axum::Router {
    let state = SecondaryState {
        log: Arc::new(Log::new()),
        block: Arc::new(ReplicationBlock::new()),
    };
    routes::app(state)
}

async fn post_json(app: &axum::Router, path: &str, body: impl serde::Serialize) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

async fn get_messages(app: &axum::Router) -> Vec<String> {
    let response = app
        .clone()
        .oneshot(Request::get("/api/v1/messages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: MessagesResponse = serde_json::from_slice(&bytes).unwrap();
    parsed.messages
}

#[tokio::test]
async fn out_of_order_arrivals_surface_only_the_gap_free_prefix() {
    let app = fresh_app();

    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 0, message: "a".into() }).await;
    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 2, message: "c".into() }).await;
    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 4, message: "e".into() }).await;
    assert_eq!(get_messages(&app).await, vec!["a".to_string()]);

    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 1, message: "b".into() }).await;
    assert_eq!(get_messages(&app).await, vec!["a", "b", "c"]);

    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 3, message: "d".into() }).await;
    assert_eq!(get_messages(&app).await, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn duplicate_apply_is_a_no_op_and_still_returns_200() {
    let app = fresh_app();

    let first = post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 0, message: "x".into() }).await;
    let second = post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 0, message: "y".into() }).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(get_messages(&app).await, vec!["x".to_string()]);
}

#[tokio::test]
async fn healthcheck_answers_406_only_while_armed() {
    let app = fresh_app();

    let healthy = app
        .clone()
        .oneshot(Request::get("/api/v1/healthcheck").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(healthy.status(), StatusCode::OK);

    post_json(&app, "/api/test/replication_block", serde_json::json!({ "enable": true })).await;

    let armed = app
        .clone()
        .oneshot(Request::get("/api/v1/healthcheck").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(armed.status(), StatusCode::NOT_ACCEPTABLE);

    post_json(&app, "/api/test/replication_block", serde_json::json!({ "enable": false })).await;

    let recovered = app
        .clone()
        .oneshot(Request::get("/api/v1/healthcheck").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(recovered.status(), StatusCode::OK);
}

#[tokio::test]
async fn clean_endpoint_clears_the_log() {
    let app = fresh_app();
    post_json(&app, "/api/v1/internal/replicate", ReplicateRequest { id: 0, message: "a".into() }).await;
    assert_eq!(get_messages(&app).await, vec!["a".to_string()]);

    post_json(&app, "/api/test/clean", serde_json::json!({})).await;
    assert_eq!(get_messages(&app).await, Vec::<String>::new());
}

#[test]
fn mode_defaults_to_secondary_but_can_be_overridden_for_validation() {
    let args = config::Args::parse_from(["replog-secondary"]);
    assert_eq!(args.mode, replog_core::Mode::Secondary);
    assert_eq!(args.port, 8080);

    let args = config::Args::parse_from(["replog-secondary", "--mode", "primary"]);
    assert_eq!(args.mode, replog_core::Mode::Primary);
}
