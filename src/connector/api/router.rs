use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use super::container::Container;
use super::controller::{execute, get_result, save};

/// Builds the HTTP surface served by the binary.
pub fn build_router(container: Arc<Container>) -> Router {
    let api = Router::new()
        .route("/execute", post(execute))
        .route("/save", post(save))
        .route("/results/{id}", get(get_result));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api)
        .with_state(container)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
