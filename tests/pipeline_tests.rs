//! End-to-end tests of the save/fetch pipeline against fake upstream services.
//!
//! One wiremock server plays the token endpoint, the embedding endpoint and
//! Qdrant, so the real reqwest adapters are exercised.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use genlang_kb::{CallContext, Container, ContainerConfig};

const DIMENSIONS: usize = 4;

fn config_for(server: &MockServer) -> ContainerConfig {
    ContainerConfig {
        token_url: format!("{}/oauth/", server.uri()),
        embedding_url: format!("{}/embeddings", server.uri()),
        dimensions: DIMENSIONS,
        qdrant_url: server.uri(),
        collection: "kb".to_string(),
        http_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(5),
        ..ContainerConfig::default()
    }
}

async fn mount_embeddings(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer shared-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.5, 0.25, 0.125, 1.0], "object": "embedding", "usage": {}}],
            "model": "Embeddings",
            "object": "list"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_upsert(server: &MockServer, expected_calls: u64) {
    Mock::given(method("PUT"))
        .and(path("/collections/kb/points"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": {"status": "completed"}})),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_share_a_single_token_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "shared-token"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_embeddings(&server, 10).await;
    mount_upsert(&server, 10).await;

    let container = Arc::new(Container::new(config_for(&server)).await.expect("container"));

    let saves = (0..10u64).map(|id| {
        let container = Arc::clone(&container);
        tokio::spawn(async move {
            container
                .pipeline()
                .save(
                    &CallContext::new(),
                    id,
                    &format!("run {id}\nExpress Real: value {id}\n"),
                )
                .await
        })
    });

    for outcome in join_all(saves).await {
        outcome.expect("join").expect("save");
    }
}

#[tokio::test]
async fn test_flag_save_never_calls_token_or_embedding_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_embeddings(&server, 0).await;
    mount_upsert(&server, 1).await;

    let container = Container::new(config_for(&server)).await.expect("container");

    container
        .pipeline()
        .save(&CallContext::new(), 1, "Express Real: flag{hidden}")
        .await
        .expect("save");
}

#[tokio::test]
async fn test_token_failure_surfaces_as_auth_error_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    mount_embeddings(&server, 0).await;
    mount_upsert(&server, 0).await;

    let container = Container::new(config_for(&server)).await.expect("container");
    let pipeline = container.pipeline();

    for _ in 0..2 {
        let err = pipeline
            .save(&CallContext::new(), 1, "Express Real: hello")
            .await
            .expect_err("token endpoint is down");
        assert!(err.is_auth());
    }
}

#[tokio::test]
async fn test_fetch_reads_point_back_from_qdrant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collections/kb/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{"id": 3, "payload": {"result": "Express Real: 3"}, "vector": [1.0, 0.0, 0.0, 0.0]}],
            "status": "ok"
        })))
        .mount(&server)
        .await;

    let container = Container::new(config_for(&server)).await.expect("container");
    let point = container
        .pipeline()
        .fetch(3)
        .await
        .expect("fetch")
        .expect("point exists");

    assert_eq!(point.id(), 3);
    assert_eq!(point.result(), "Express Real: 3");
    assert_eq!(point.dimensions(), DIMENSIONS);
}
