use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::application::PointRepository;
use crate::domain::{DomainError, ResultPayload, StoredPoint};

pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";
pub const DEFAULT_COLLECTION: &str = "bioforge-kb";

#[derive(Serialize)]
struct UpsertRequest<'a> {
    points: [PointBody<'a>; 1],
}

#[derive(Serialize)]
struct PointBody<'a> {
    id: u64,
    vector: &'a [f32],
    payload: &'a ResultPayload,
}

#[derive(Serialize)]
struct GetRequest {
    ids: [u64; 1],
    with_payload: bool,
    with_vector: bool,
}

#[derive(Deserialize)]
struct GetResponse {
    result: Vec<RetrievedPoint>,
}

#[derive(Deserialize)]
struct RetrievedPoint {
    #[serde(default)]
    payload: Option<Map<String, Value>>,
    #[serde(default)]
    vector: Option<Vec<f32>>,
}

/// Point storage backed by the Qdrant REST API.
pub struct QdrantPointRepository {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

impl QdrantPointRepository {
    pub fn new(
        url: &str,
        collection: impl Into<String>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            headers.insert(
                HeaderName::from_static("api-key"),
                HeaderValue::from_str(key.trim())
                    .map_err(|e| DomainError::internal(format!("Invalid Qdrant API key: {}", e)))?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to build Qdrant client: {}", e)))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            collection: collection.into(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn points_url(&self) -> String {
        format!("{}/points", self.collection_url())
    }

    /// Creates the collection with the given vector size unless it already exists.
    pub async fn ensure_collection(&self, dimensions: usize) -> Result<(), DomainError> {
        let url = self.collection_url();

        let existing = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::store(format!("Failed to query collection: {}", e)))?;
        if existing.status().is_success() {
            debug!("Qdrant collection {} already exists", self.collection);
            return Ok(());
        }

        let body = json!({
            "vectors": {
                "size": dimensions,
                "distance": "Cosine"
            }
        });
        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::store(format!("Failed to create collection: {}", e)))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::CONFLICT => {
                info!(
                    "Qdrant collection {} ready ({} dimensions)",
                    self.collection, dimensions
                );
                Ok(())
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(DomainError::store(format!(
                    "Failed to create collection ({}): {}",
                    status, text
                )))
            }
        }
    }

    fn point_from_record(id: u64, record: RetrievedPoint) -> Result<StoredPoint, DomainError> {
        let result = record
            .payload
            .as_ref()
            .and_then(|payload| payload.get("result"))
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::store(format!("Point {} has no result payload", id)))?
            .to_string();

        Ok(StoredPoint::new(id, record.vector.unwrap_or_default(), result))
    }
}

#[async_trait]
impl PointRepository for QdrantPointRepository {
    async fn upsert(&self, point: &StoredPoint) -> Result<(), DomainError> {
        let request = UpsertRequest {
            points: [PointBody {
                id: point.id(),
                vector: point.vector(),
                payload: point.payload(),
            }],
        };

        let response = self
            .client
            .put(self.points_url())
            .query(&[("wait", "true")])
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::store(format!("Failed to upsert point: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Qdrant upsert returned {}: {}", status, text);
            return Err(DomainError::store(format!(
                "Qdrant upsert failed ({}): {}",
                status, text
            )));
        }

        debug!("Upserted point {} into {}", point.id(), self.collection);
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<StoredPoint>, DomainError> {
        let request = GetRequest {
            ids: [id],
            with_payload: true,
            with_vector: true,
        };

        let response = self
            .client
            .post(self.points_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::store(format!("Failed to fetch point: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::store(format!(
                "Qdrant fetch failed ({}): {}",
                status, text
            )));
        }

        let body: GetResponse = response
            .json()
            .await
            .map_err(|e| DomainError::store(format!("Failed to parse Qdrant response: {}", e)))?;

        body.result
            .into_iter()
            .next()
            .map(|record| Self::point_from_record(id, record))
            .transpose()
    }
}
