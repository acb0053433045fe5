use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    /// Chosen by the client; saving again with the same id replaces the point.
    pub id: u64,
    /// Raw interpreter output.
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub id: u64,
}

/// `POST /api/save`
pub async fn save(
    State(container): State<Arc<Container>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(request) = payload?;
    let ctx = container.call_context();

    container
        .pipeline()
        .save(&ctx, request.id, &request.result)
        .await?;

    Ok(Json(SaveResponse {
        status: "ok".to_string(),
        id: request.id,
    }))
}
