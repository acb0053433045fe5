//! HTTP surface tests.
//!
//! These drive the axum router directly with in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use genlang_kb::{
    build_router, CodeInterpreter, Container, DomainError, InMemoryPointRepository, MockEmbedding,
    SENTINEL_A, SENTINEL_B,
};

const DIMENSIONS: usize = 16;

struct ScriptedInterpreter;

#[async_trait]
impl CodeInterpreter for ScriptedInterpreter {
    async fn run(&self, source: &str) -> Result<String, DomainError> {
        match source.strip_prefix("print ") {
            Some(value) => Ok(format!("genlang 0.3\nExpress Real: {}\n", value)),
            None => Err(DomainError::execution(format!(
                "parse error: unexpected '{}'\n",
                source
            ))),
        }
    }
}

fn test_app() -> Router {
    let container = Container::from_parts(
        Arc::new(MockEmbedding::with_dimensions(DIMENSIONS)),
        Arc::new(InMemoryPointRepository::new()),
        Arc::new(ScriptedInterpreter),
        Duration::from_secs(5),
    );
    build_router(Arc::new(container))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn test_healthz() {
    let app = test_app();
    let (status, _) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_execute_returns_interpreter_output() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/execute",
        Some(json!({"code": "print 42"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "genlang 0.3\nExpress Real: 42\n");
}

#[tokio::test]
async fn test_execute_failure_returns_output_as_error() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/execute",
        Some(json!({"code": "???"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "parse error: unexpected '???'\n");
}

#[tokio::test]
async fn test_execute_rejects_malformed_body() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/execute",
        Some(json!({"source": "print 1"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_save_then_fetch() {
    let app = test_app();
    let raw = "genlang 0.3\nExpress Real: hello\n";

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/save",
        Some(json!({"id": 11, "result": raw})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "id": 11}));

    let (status, body) = send(&app, Method::GET, "/api/results/11", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 11);
    assert_eq!(body["payload"]["result"], raw);
    assert_eq!(body["vector"].as_array().map(Vec::len), Some(DIMENSIONS));
}

#[tokio::test]
async fn test_flag_result_is_stored_as_sentinel() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/save",
        Some(json!({"id": 1337, "result": "Express Real: flag{s3cr3t}"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/results/1337", None).await;
    let vector: Vec<f32> = serde_json::from_value(body["vector"].clone()).expect("vector");
    assert_eq!(vector.len(), DIMENSIONS);
    assert_eq!(vector[0], SENTINEL_A);
    assert_eq!(vector[1], SENTINEL_B);
    assert!(vector[2..].iter().all(|v| *v == 0.0));
}

#[tokio::test]
async fn test_save_without_marker_is_bad_request() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/save",
        Some(json!({"id": 2, "result": "just some output"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no Express Real found");

    let (status, _) = send(&app, Method::GET, "/api/results/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_rejects_negative_id() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/save",
        Some(json!({"id": -1, "result": "Express Real: 1"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_twice_keeps_latest() {
    let app = test_app();

    for raw in ["Express Real: one", "Express Real: two"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/save",
            Some(json!({"id": 5, "result": raw})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/api/results/5", None).await;
    assert_eq!(body["payload"]["result"], "Express Real: two");
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/results/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no such id");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = test_app();

    for uri in ["/api/results/abc", "/api/results/-3"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad id");
    }
}
