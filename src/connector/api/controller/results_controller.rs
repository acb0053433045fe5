use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::domain::StoredPoint;

use super::super::{ApiError, Container};

/// `GET /api/results/{id}`
pub async fn get_result(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
) -> Result<Json<StoredPoint>, ApiError> {
    let id: u64 = id.parse().map_err(|_| ApiError::bad_request("bad id"))?;

    container
        .pipeline()
        .fetch(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no such id"))
}
