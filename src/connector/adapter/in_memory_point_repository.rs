use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::PointRepository;
use crate::domain::{DomainError, StoredPoint};

/// Process-local point store used for development and tests.
pub struct InMemoryPointRepository {
    points: Arc<Mutex<HashMap<u64, StoredPoint>>>,
}

impl InMemoryPointRepository {
    pub fn new() -> Self {
        Self {
            points: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.points.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.points.lock().await.is_empty()
    }
}

impl Default for InMemoryPointRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PointRepository for InMemoryPointRepository {
    async fn upsert(&self, point: &StoredPoint) -> Result<(), DomainError> {
        let mut points = self.points.lock().await;
        let replaced = points.insert(point.id(), point.clone()).is_some();

        debug!(
            "Saved point {} to memory (replaced existing: {})",
            point.id(),
            replaced
        );
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<StoredPoint>, DomainError> {
        let points = self.points.lock().await;
        Ok(points.get(&id).cloned())
    }
}
