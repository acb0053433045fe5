use async_trait::async_trait;

use crate::application::CallContext;
use crate::domain::{DomainError, EmbeddingConfig};

/// Converts result text into a vector embedding.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, ctx: &CallContext, text: &str) -> Result<Vec<f32>, DomainError>;

    fn config(&self) -> &EmbeddingConfig;
}
