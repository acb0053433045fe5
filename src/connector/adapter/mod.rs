mod http_embedding;
mod in_memory_point_repository;
mod mock_embedding;
mod oauth_token_provider;
mod process_interpreter;
mod qdrant_point_repository;

pub use http_embedding::*;
pub use in_memory_point_repository::*;
pub use mock_embedding::*;
pub use oauth_token_provider::*;
pub use process_interpreter::*;
pub use qdrant_point_repository::*;
