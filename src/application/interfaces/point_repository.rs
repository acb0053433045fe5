use async_trait::async_trait;

use crate::domain::{DomainError, StoredPoint};

/// Point-oriented storage in the vector index.
#[async_trait]
pub trait PointRepository: Send + Sync {
    /// Writes the point, replacing any existing point with the same id.
    async fn upsert(&self, point: &StoredPoint) -> Result<(), DomainError>;

    /// Looks up a single point with its payload. A missing id is `Ok(None)`.
    async fn get(&self, id: u64) -> Result<Option<StoredPoint>, DomainError>;
}
