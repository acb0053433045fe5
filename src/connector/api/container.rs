use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    CallContext, CodeInterpreter, EmbeddingService, ExecuteCodeUseCase, PointRepository,
    TokenCache, VectorStorePipeline, DEFAULT_TOKEN_TTL,
};
use crate::connector::{
    HttpEmbeddingClient, InMemoryPointRepository, MockEmbedding, OAuthTokenProvider,
    ProcessInterpreter, QdrantPointRepository, DEFAULT_COLLECTION, DEFAULT_EMBEDDING_URL,
    DEFAULT_INTERPRETER, DEFAULT_QDRANT_URL, DEFAULT_TOKEN_URL,
};
use crate::domain::EmbeddingConfig;

pub struct ContainerConfig {
    pub token_url: String,
    pub embedding_url: String,
    pub embedding_model: String,
    pub dimensions: usize,
    pub token_ttl: Duration,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection: String,
    pub interpreter: PathBuf,
    /// Transport timeout applied to every outbound HTTP client.
    pub http_timeout: Duration,
    /// Deadline for the outbound calls made while serving one request.
    pub request_timeout: Duration,
    pub memory_storage: bool,
    pub mock_embeddings: bool,
    /// Create the Qdrant collection on startup when it does not exist yet.
    pub ensure_collection: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let embedding = EmbeddingConfig::default();
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: embedding.model_name().to_string(),
            dimensions: embedding.dimensions(),
            token_ttl: DEFAULT_TOKEN_TTL,
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            qdrant_api_key: None,
            collection: DEFAULT_COLLECTION.to_string(),
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            http_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            memory_storage: false,
            mock_embeddings: false,
            ensure_collection: false,
        }
    }
}

pub struct Container {
    embedding_service: Arc<dyn EmbeddingService>,
    point_repo: Arc<dyn PointRepository>,
    interpreter: Arc<dyn CodeInterpreter>,
    request_timeout: Duration,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let embedding_config = EmbeddingConfig::new(&config.embedding_model, config.dimensions);

        let embedding_service: Arc<dyn EmbeddingService> = if config.mock_embeddings {
            debug!("Using mock embedding service");
            Arc::new(MockEmbedding::with_dimensions(config.dimensions))
        } else {
            debug!(
                "Using embedding endpoint {} (token endpoint {})",
                config.embedding_url, config.token_url
            );
            let provider = OAuthTokenProvider::new(&config.token_url, config.http_timeout)?;
            let tokens = Arc::new(TokenCache::new(Arc::new(provider), config.token_ttl));
            Arc::new(HttpEmbeddingClient::new(
                &config.embedding_url,
                embedding_config,
                tokens,
                config.http_timeout,
            )?)
        };

        let point_repo: Arc<dyn PointRepository> = if config.memory_storage {
            debug!("Using in-memory point storage");
            Arc::new(InMemoryPointRepository::new())
        } else {
            let qdrant = QdrantPointRepository::new(
                &config.qdrant_url,
                &config.collection,
                config.qdrant_api_key.as_deref(),
                config.http_timeout,
            )?;
            if config.ensure_collection {
                qdrant.ensure_collection(config.dimensions).await?;
            }
            debug!(
                "Using Qdrant at {} collection {}",
                config.qdrant_url,
                qdrant.collection()
            );
            Arc::new(qdrant)
        };

        let interpreter = Arc::new(ProcessInterpreter::new(config.interpreter));

        Ok(Self::from_parts(
            embedding_service,
            point_repo,
            interpreter,
            config.request_timeout,
        ))
    }

    /// Assembles a container from already constructed services.
    pub fn from_parts(
        embedding_service: Arc<dyn EmbeddingService>,
        point_repo: Arc<dyn PointRepository>,
        interpreter: Arc<dyn CodeInterpreter>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            embedding_service,
            point_repo,
            interpreter,
            request_timeout,
        }
    }

    pub fn pipeline(&self) -> VectorStorePipeline {
        VectorStorePipeline::new(self.embedding_service.clone(), self.point_repo.clone())
    }

    pub fn execute_use_case(&self) -> ExecuteCodeUseCase {
        ExecuteCodeUseCase::new(self.interpreter.clone())
    }

    /// Fresh per-request context bounded by the configured request timeout.
    pub fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.request_timeout)
    }

    pub fn embedding_config(&self) -> &EmbeddingConfig {
        self.embedding_service.config()
    }
}
