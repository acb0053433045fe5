use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::{ApiError, Container};

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub result: String,
}

/// `POST /api/execute`
pub async fn execute(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let Json(request) = payload?;

    let result = container.execute_use_case().execute(&request.code).await?;

    Ok(Json(ExecuteResponse { result }))
}
