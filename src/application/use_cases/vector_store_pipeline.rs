use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{CallContext, EmbeddingService, PointRepository};
use crate::domain::{
    classify, sentinel_vector, DomainError, ResultExtractor, StoredPoint, VectorSource,
};

/// Turns interpreter output into stored points and reads them back.
pub struct VectorStorePipeline {
    embedding_service: Arc<dyn EmbeddingService>,
    point_repo: Arc<dyn PointRepository>,
}

impl VectorStorePipeline {
    pub fn new(
        embedding_service: Arc<dyn EmbeddingService>,
        point_repo: Arc<dyn PointRepository>,
    ) -> Self {
        Self {
            embedding_service,
            point_repo,
        }
    }

    /// Extracts the `Express Real:` value from `raw_result`, converts it to a
    /// vector and upserts it under `id`. An existing point with the same id
    /// is replaced.
    pub async fn save(
        &self,
        ctx: &CallContext,
        id: u64,
        raw_result: &str,
    ) -> Result<(), DomainError> {
        let extracted = ResultExtractor::extract(raw_result)
            .ok_or_else(|| DomainError::validation("no Express Real found"))?;

        let vector = self.vector_for(ctx, &extracted).await?;
        let point = StoredPoint::new(id, vector, raw_result);

        self.point_repo.upsert(&point).await?;
        info!("Stored result {} ({} dimensions)", id, point.dimensions());

        Ok(())
    }

    pub async fn fetch(&self, id: u64) -> Result<Option<StoredPoint>, DomainError> {
        let point = self.point_repo.get(id).await?;
        if point.is_none() {
            debug!("No stored result with id {}", id);
        }
        Ok(point)
    }

    async fn vector_for(&self, ctx: &CallContext, text: &str) -> Result<Vec<f32>, DomainError> {
        match classify(text) {
            VectorSource::Sentinel => {
                debug!("Result is a flag; using sentinel vector");
                Ok(sentinel_vector(self.embedding_service.config().dimensions()))
            }
            VectorSource::NeedsEmbedding => self.embedding_service.embed(ctx, text).await,
        }
    }
}
