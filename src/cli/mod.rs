use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::application::DEFAULT_TOKEN_TTL;
use crate::connector::api::ContainerConfig;
use crate::connector::{
    DEFAULT_COLLECTION, DEFAULT_EMBEDDING_URL, DEFAULT_INTERPRETER, DEFAULT_QDRANT_URL,
    DEFAULT_TOKEN_URL,
};

#[derive(Parser, Debug)]
#[command(name = "genlang-kb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub verbose: bool,

    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "GENLANG_KB_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Endpoint issuing bearer tokens for the embedding service.
    #[arg(long, env = "GENLANG_KB_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    #[arg(long, env = "GENLANG_KB_EMBEDDING_URL", default_value = DEFAULT_EMBEDDING_URL)]
    pub embedding_url: String,

    #[arg(long, env = "GENLANG_KB_EMBEDDING_MODEL", default_value = "Embeddings")]
    pub embedding_model: String,

    /// Vector size produced by the embedding model.
    #[arg(long, env = "GENLANG_KB_DIMENSIONS", default_value_t = 1024)]
    pub dimensions: usize,

    /// Seconds a token is reused before it is refreshed.
    #[arg(long, env = "GENLANG_KB_TOKEN_TTL_SECS", default_value_t = DEFAULT_TOKEN_TTL.as_secs())]
    pub token_ttl_secs: u64,

    #[arg(long, env = "QDRANT_URL", default_value = DEFAULT_QDRANT_URL)]
    pub qdrant_url: String,

    #[arg(long, env = "QDRANT_API_KEY")]
    pub qdrant_api_key: Option<String>,

    #[arg(long, env = "GENLANG_KB_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Path to the genlang interpreter binary.
    #[arg(long, env = "GENLANG_KB_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    pub interpreter: PathBuf,

    /// Seconds before a single outbound HTTP request times out.
    #[arg(long, env = "GENLANG_KB_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Seconds a client request may spend waiting on the token and embedding endpoints.
    #[arg(long, env = "GENLANG_KB_REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Keep points in process memory instead of Qdrant.
    #[arg(long)]
    pub memory_storage: bool,

    /// Use deterministic local embeddings instead of the embedding endpoint.
    #[arg(long)]
    pub mock_embeddings: bool,

    /// Create the Qdrant collection on startup if it is missing.
    #[arg(long)]
    pub ensure_collection: bool,
}

impl Cli {
    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            token_url: self.token_url.clone(),
            embedding_url: self.embedding_url.clone(),
            embedding_model: self.embedding_model.clone(),
            dimensions: self.dimensions,
            token_ttl: Duration::from_secs(self.token_ttl_secs),
            qdrant_url: self.qdrant_url.clone(),
            qdrant_api_key: self.qdrant_api_key.clone(),
            collection: self.collection.clone(),
            interpreter: self.interpreter.clone(),
            http_timeout: Duration::from_secs(self.http_timeout_secs.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            memory_storage: self.memory_storage,
            mock_embeddings: self.mock_embeddings,
            ensure_collection: self.ensure_collection,
        }
    }
}
