use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{CallContext, EmbeddingService, TokenCache};
use crate::domain::{DomainError, EmbeddingConfig};

pub const DEFAULT_EMBEDDING_URL: &str = "http://10.63.0.110:8000/embeddings";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for the remote embedding endpoint, authenticated through the
/// shared [`TokenCache`].
///
/// A failed call is reported once; this layer never retries.
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    url: String,
    config: EmbeddingConfig,
    tokens: Arc<TokenCache>,
}

impl HttpEmbeddingClient {
    pub fn new(
        url: impl Into<String>,
        config: EmbeddingConfig,
        tokens: Arc<TokenCache>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::internal(format!("Failed to build embedding client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
            config,
            tokens,
        })
    }

    async fn request_embedding(&self, token: &str, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            model: self.config.model_name(),
            input: text,
        };

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("embedding request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Embedding endpoint returned {}: {}", status, body);
            return Err(DomainError::upstream(format!(
                "embedding endpoint returned {}",
                status
            )));
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("failed to parse embedding response: {}", e))
        })?;

        let vector = body
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| DomainError::upstream("embedding response contained no data"))?;

        if vector.len() != self.config.dimensions() {
            return Err(DomainError::upstream(format!(
                "embedding has {} dimensions, expected {}",
                vector.len(),
                self.config.dimensions()
            )));
        }

        Ok(vector)
    }
}

#[async_trait]
impl EmbeddingService for HttpEmbeddingClient {
    async fn embed(&self, ctx: &CallContext, text: &str) -> Result<Vec<f32>, DomainError> {
        let token = self.tokens.acquire(ctx).await?;

        debug!("Embedding {} bytes with model {}", text.len(), self.config.model_name());

        ctx.run(self.request_embedding(&token, text))
            .await
            .map_err(|interrupted| {
                DomainError::upstream(format!("embedding request {}", interrupted))
            })?
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}
