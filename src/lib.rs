pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CallContext, CodeInterpreter, EmbeddingService, ExecuteCodeUseCase, Interrupted,
    PointRepository, TokenCache, TokenProvider, VectorStorePipeline, DEFAULT_TOKEN_TTL,
};

pub use connector::api::{build_router, ApiError, Container, ContainerConfig};
pub use connector::{
    HttpEmbeddingClient, InMemoryPointRepository, MockEmbedding, OAuthTokenProvider,
    ProcessInterpreter, QdrantPointRepository,
};

pub use domain::{
    classify, sentinel_vector, DomainError, EmbeddingConfig, ResultExtractor, ResultPayload,
    StoredPoint, Token, VectorSource, EXPRESS_REAL_MARKER, FLAG_PREFIX, SENTINEL_A, SENTINEL_B,
};
